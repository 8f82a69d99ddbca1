//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod status_banner;
mod image_picker;
mod login_panel;
mod projects_admin;
mod gallery_admin;
mod gallery_grid;
mod projects_showcase;
mod contact_form;

pub use delete_confirm_button::DeleteConfirmButton;
pub use status_banner::StatusBanner;
pub use image_picker::ImagePicker;
pub use login_panel::LoginPanel;
pub use projects_admin::ProjectsAdmin;
pub use gallery_admin::GalleryAdmin;
pub use gallery_grid::GalleryGrid;
pub use projects_showcase::ProjectsShowcase;
pub use contact_form::ContactForm;

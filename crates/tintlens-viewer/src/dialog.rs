//! Native dialogs via rfd.

use std::path::PathBuf;

/// Extensions offered by the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Ask the user for an image. `None` when the dialog is cancelled.
pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select an Image")
        .add_filter("Image files", IMAGE_EXTENSIONS)
        .pick_file()
}

pub fn show_info(title: &str, message: &str) {
    show(rfd::MessageLevel::Info, title, message);
}

pub fn show_error(message: &str) {
    show(rfd::MessageLevel::Error, "Error", message);
}

fn show(level: rfd::MessageLevel, title: &str, message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

/// File extensions accepted for feature images, lower-case with the dot.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

pub const INVALID_IMAGE_FORMAT: &str =
    "Invalid Image Format. Allowed format are .jpg, .jpeg and .png";

/// An uploaded feature image as received from the caller.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn extension(&self) -> Option<String> {
        allowed_extension(&self.file_name)
    }
}

/// Return the lower-cased extension of `file_name` if it is on the allow-list.
///
/// Only the final path component is inspected, so `photo.png.exe` and
/// `dir.png/file` are both rejected.
pub fn allowed_extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file_name);
    let dot = base.rfind('.')?;
    let ext = base[dot..].to_ascii_lowercase();

    ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

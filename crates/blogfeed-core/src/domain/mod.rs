//! Domain entities - the core business objects.

mod category;
mod comment;
mod image;
mod post;
mod text;

pub use category::{Category, CategoryInput};
pub use comment::{Comment, CommentInput, CommentView};
pub use image::{ALLOWED_IMAGE_EXTENSIONS, INVALID_IMAGE_FORMAT, ImageUpload, allowed_extension};
pub use post::{EditPostForm, Post, PostDetail, PostInput, PostListing, PostWithCategory};
pub use text::{excerpt, strip_html_tags};

pub mod images;

pub use images::list_image_names;

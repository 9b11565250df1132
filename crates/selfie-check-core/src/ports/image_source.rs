//! Image source port: where uploaded selfies come from.

use crate::domain::ImageInfo;

/// Port for supplying decoded images to the validator.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over decoded images.
    ///
    /// # Errors
    ///
    /// An item is an error when that image cannot be read or decoded; the
    /// remaining items are still yielded.
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_>;

    /// Returns the number of images the iterator will yield, if known up front.
    fn count_hint(&self) -> Option<usize>;
}

//! Image handles

/// Opaque handle to a texture owned by a rendering backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// Something that can be drawn with `Canvas::draw_image*`
pub trait ImageSource {
    /// Backend texture, `None` while the image has not been uploaded
    fn image_id(&self) -> Option<ImageId>;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn image_id(&self) -> Option<ImageId> {
        (**self).image_id()
    }

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }
}

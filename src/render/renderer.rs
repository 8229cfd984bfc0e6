//! Bucket renderer.

use crate::classify::Bucket;
use crate::error::Result;
use crate::render::screen::Screen;

/// Paint `bucket` onto `screen`.
///
/// The same call serves every view; only the bucket differs. A failure is returned as
/// `RenderFailure` and leaves the caller free to try again on the next key press.
pub fn render(screen: &mut dyn Screen, bucket: &Bucket) -> Result<()> {
    log::debug!("rendering {} ({} lines)", bucket.id(), bucket.len());
    screen.draw(bucket)
}

//! Backgammon position diagrams from XGID strings.
//!
//! The pipeline is: [`xgid::decode`] turns an XGID string into a
//! [`models::Position`] snapshot, [`replay::replay`] walks the snapshot
//! and emits [`models::DrawPrimitive`]s into a
//! [`builder::DiagramBuilder`], and a rendering backend resolves the
//! abstract positions to coordinates through [`geometry::Geometry`].
//! [`diagram_from_xgid`] runs the whole pipeline in one call.

pub mod builder;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod models;
pub mod replay;
pub mod xgid;

pub use builder::{Diagram, DiagramBuilder, DiagramOptions, diagram_from_xgid};
pub use error::{DecodeError, DiagramWarning};
pub use geometry::Geometry;
pub use models::{BoardPos, DrawPrimitive, Position, Side, StyleTag};
pub use xgid::decode;

use png::{BitDepth, ColorType, Encoder};

// Shared PNG encoder: RGBA -> PNG bytes (deterministic for same input)
pub fn encode_rgba_to_png_bytes(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        {
            let mut writer = enc.write_header()?;
            writer.write_image_data(rgba)?;
        }
        // enc drops here, releasing the &mut buf borrow
    }
    Ok(buf)
}

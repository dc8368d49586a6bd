use thiserror::Error;

/// Failures a render surfaces to its caller.
///
/// Malformed scene graphs (an empty BVH input, a zero-sized window) are
/// programmer errors and panic instead; numerical edge cases are ordinary
/// no-hit control flow.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the output stream failed; the render stops rather than
    /// emitting a truncated image silently.
    #[error("failed to write image output")]
    Output(#[from] std::io::Error),

    /// A texture image could not be opened or decoded.
    #[error("failed to decode texture image")]
    Texture(#[from] image::ImageError),
}

use std::path::PathBuf;

/// Errors produced while loading templates.
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("no usable .png templates found in {dir}")]
    NoTemplates { dir: PathBuf },
    #[error("template set is empty")]
    EmptyTemplateSet,
}

/// Errors produced while locating the anchor cell.
#[derive(thiserror::Error, Debug)]
pub enum CalibrationError {
    #[error("template set has no tile templates (only the empty slot)")]
    NoCandidateTemplates,
    #[error("frame {frame_width}x{frame_height} is smaller than a {cell_width}x{cell_height} cell")]
    FrameTooSmall {
        frame_width: usize,
        frame_height: usize,
        cell_width: u32,
        cell_height: u32,
    },
    #[error("best template '{template}' scored {score:.3}, below {min_score:.3}")]
    BelowThreshold {
        template: String,
        score: f64,
        min_score: f64,
    },
    #[error("colour recheck of '{template}' scored {score:.3}, below {min_score:.3}")]
    RecheckFailed {
        template: String,
        score: f64,
        min_score: f64,
    },
}

//! Recording adapters

mod ffmpeg;

pub use ffmpeg::FfmpegRecorder;

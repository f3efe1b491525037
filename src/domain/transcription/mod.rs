//! Transcription domain module

mod audio_data;
mod transcript_file;

pub use audio_data::{AudioData, AudioFormat};
pub use transcript_file::TranscriptFormat;

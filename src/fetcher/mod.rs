// src/fetcher/mod.rs

mod image;
mod video;

pub use image::{ImageFetcher, choose_extension};
pub use video::{VideoFetcher, VideoOutcome, YtDlp, interpret};

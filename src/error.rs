use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

/// 렌더링 전체를 중단시키는 오류. 기하학적으로 퇴화한 경우(전반사, 반지름 0 등)는 오류가 아님.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("환경 맵을 불러올 수 없음: {path}")]
    EnvironmentLoad {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("환경 맵의 채널 수가 3이 아님: {path} ({channels}채널)")]
    ChannelCount { path: PathBuf, channels: u8 },

    #[error("환경 맵 크기가 맞지 않음: {width}x{height}, 픽셀 {pixels}개")]
    EnvironmentSize {
        width: usize,
        height: usize,
        pixels: usize,
    },

    #[error("지원하지 않는 이미지 형식: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("이미지를 저장할 수 없음: {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

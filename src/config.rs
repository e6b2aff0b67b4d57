use std::path::PathBuf;

use crate::tracer::Settings;

/// 한 번의 렌더링에 필요한 모든 설정. 실행 파일은 인자를 받지 않고 기본값을 그대로 씀.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// 라디안
    pub vertical_fov: f32,
    pub environment_path: PathBuf,
    pub output_path: PathBuf,
    pub tracer: Settings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            vertical_fov: 60f32.to_radians(),
            environment_path: PathBuf::from("envmap.jpg"),
            output_path: PathBuf::from("output.jpg"),
            tracer: Settings::default(),
        }
    }
}

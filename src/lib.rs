use std::time::Instant;

use log::{debug, error, info};
use nalgebra::Vector3;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::tracer::scene::Scene;
use crate::tracer::texture::{EnvironmentMap, Framebuffer};
use crate::tracer::Tracer;

pub mod camera;
pub mod config;
pub mod error;
pub mod tracer;
pub mod util;

/// 선형 RGB
pub type Color = Vector3<f32>;

/// 장면과 환경 맵이 준비된 상태에서 한 장을 렌더링함
pub fn render(config: &RenderConfig, scene: &Scene, environment: &EnvironmentMap) -> Framebuffer {
    let camera = Camera::new(config.vertical_fov, config.width, config.height);
    Tracer::new(config.tracer.clone(), scene, environment).render(&camera)
}

pub fn run() -> Result<(), RenderError> {
    // 로거 초기화. RUST_LOG가 없으면 info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run_with(&RenderConfig::default())
}

pub fn run_with(config: &RenderConfig) -> Result<(), RenderError> {
    let started = Instant::now();
    debug!("{config:?}");

    // 환경 맵을 못 불러오면 아무것도 그리지 않음
    let environment = EnvironmentMap::load(&config.environment_path).map_err(|e| {
        error!("{e}");
        e
    })?;
    let scene = Scene::demo();

    info!("렌더링 시작: {}x{}", config.width, config.height);
    let framebuffer = render(config, &scene, &environment);

    framebuffer.save(&config.output_path).map_err(|e| {
        error!("{e}");
        e
    })?;
    info!(
        "완료: {} ({:.2}초)",
        config.output_path.display(),
        started.elapsed().as_secs_f32()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_environment_map_aborts() {
        let config = RenderConfig {
            width: 4,
            height: 3,
            environment_path: std::env::temp_dir().join("whitted-missing-envmap.jpg"),
            output_path: std::env::temp_dir().join("whitted-never-written.jpg"),
            ..RenderConfig::default()
        };

        let result = run_with(&config);
        assert!(matches!(result, Err(RenderError::EnvironmentLoad { .. })));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn renders_demo_scene_at_configured_size() {
        let config = RenderConfig {
            width: 32,
            height: 24,
            ..RenderConfig::default()
        };
        let environment = EnvironmentMap::uniform(Vector3::new(0.5, 0.5, 0.5));
        let framebuffer = render(&config, &Scene::demo(), &environment);

        assert_eq!((framebuffer.width(), framebuffer.height()), (32, 24));
        // 구석은 배경(0.5 → 127)
        assert_eq!(framebuffer.get(0, 0), [127, 127, 127]);
    }
}

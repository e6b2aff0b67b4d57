use log::{debug, warn};
use nalgebra::{Point3, Vector3};

use crate::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub ambient: f32,
    pub reflectivity: f32,
    pub refractivity: f32,
    pub ior: f32,
}

impl Material {
    pub fn new(
        color: Color,
        diffuse: f32,
        specular: f32,
        shininess: f32,
        reflectivity: f32,
        refractivity: f32,
        ior: f32,
    ) -> Self {
        Self {
            color,
            diffuse,
            specular,
            shininess,
            ambient: 0.1,
            reflectivity,
            refractivity,
            ior,
        }
    }

    pub fn with_ambient(self, ambient: f32) -> Self {
        Self { ambient, ..self }
    }

    pub fn ivory() -> Self {
        Self::new(Vector3::new(0.4, 0.4, 0.3), 0.6, 0.3, 50.0, 0.1, 0.0, 1.0)
    }

    pub fn red_rubber() -> Self {
        Self::new(Vector3::new(0.3, 0.1, 0.1), 0.9, 0.1, 10.0, 0.0, 0.0, 1.0)
    }

    pub fn mirror() -> Self {
        Self::new(Vector3::new(1.0, 1.0, 1.0), 0.0, 10.0, 1425.0, 0.8, 0.0, 1.0)
    }

    pub fn glass() -> Self {
        Self::new(Vector3::new(0.6, 0.7, 0.8), 0.0, 0.5, 125.0, 0.1, 0.8, 1.5)
    }

    /// 반사율과 굴절률의 합이 1 이하인지. 강제하지는 않고, 렌더링 시 프레넬 항으로 둘을 섞기만 함.
    pub fn is_energy_conserving(&self) -> bool {
        self.reflectivity + self.refractivity <= 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vector3::new(1.0, 1.0, 1.0), 0.9, 0.1, 10.0, 0.0, 0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32, material: Material) -> Self {
        Self { center, radius, material }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Point3<f32>,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Point3<f32>, intensity: f32) -> Self {
        Self { position, intensity }
    }
}

/// y = height 평면 위, x/z 방향으로 유한한 체커보드 바닥
#[derive(Debug, Clone)]
pub struct Checkerboard {
    pub height: f32,
    /// |x| < half_width
    pub half_width: f32,
    /// z_far < z < z_near
    pub z_near: f32,
    pub z_far: f32,
    /// 좌표에 곱해지는 값. 타일 한 칸의 폭은 1 / scale
    pub scale: f32,
    pub odd_tone: Color,
    pub even_tone: Color,
    pub base: Material,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            height: -4.0,
            half_width: 10.0,
            z_near: -10.0,
            z_far: -30.0,
            scale: 0.5,
            odd_tone: Vector3::new(0.3, 0.3, 0.3),
            even_tone: Vector3::new(0.3, 0.2, 0.1),
            base: Material::default(),
        }
    }
}

impl Checkerboard {
    pub fn contains(&self, point: &Point3<f32>) -> bool {
        point.x.abs() < self.half_width && point.z < self.z_near && point.z > self.z_far
    }

    pub fn tone_at(&self, x: f32, z: f32) -> Color {
        let parity = ((self.scale * x).floor() as i64 + (self.scale * z).floor() as i64).rem_euclid(2);
        if parity == 1 {
            self.odd_tone
        } else {
            self.even_tone
        }
    }

    pub fn material_at(&self, point: &Point3<f32>) -> Material {
        Material {
            color: self.tone_at(point.x, point.z),
            ..self.base
        }
    }
}

pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
    pub floor: Option<Checkerboard>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Light>, floor: Option<Checkerboard>) -> Self {
        for (index, sphere) in spheres.iter().enumerate() {
            if !sphere.material.is_energy_conserving() {
                warn!(
                    "구 #{index}: 반사율 {} + 굴절률 {} > 1, 에너지가 보존되지 않음",
                    sphere.material.reflectivity, sphere.material.refractivity
                );
            }
        }
        debug!(
            "장면 구성: 구 {}개, 광원 {}개, 바닥 {}",
            spheres.len(),
            lights.len(),
            if floor.is_some() { "있음" } else { "없음" }
        );

        Self { spheres, lights, floor }
    }

    /// 고정된 예제 장면
    pub fn demo() -> Self {
        let spheres = vec![
            Sphere::new(Point3::new(-3.0, 0.0, -16.0), 2.0, Material::ivory()),
            Sphere::new(Point3::new(-1.0, -1.5, -12.0), 2.0, Material::glass()),
            Sphere::new(Point3::new(1.5, -0.5, -18.0), 3.0, Material::red_rubber()),
            Sphere::new(Point3::new(7.0, 5.0, -18.0), 4.0, Material::mirror()),
        ];

        let lights = vec![
            Light::new(Point3::new(-20.0, 20.0, 20.0), 1.5),
            Light::new(Point3::new(30.0, 50.0, -25.0), 1.8),
            Light::new(Point3::new(30.0, 20.0, 30.0), 1.7),
        ];

        Self::new(spheres, lights, Some(Checkerboard::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbouring_tiles_alternate() {
        let floor = Checkerboard::default();
        let tile = 1.0 / floor.scale;

        for (x, z) in [(0.5, -15.5), (-3.2, -11.0), (7.9, -29.0)] {
            let here = floor.tone_at(x, z);
            let next = floor.tone_at(x + tile, z);
            let next_next = floor.tone_at(x + 2.0 * tile, z);
            assert_ne!(here, next);
            assert_eq!(here, next_next);
        }
    }

    #[test]
    fn tiles_alternate_across_zero() {
        let floor = Checkerboard::default();
        assert_ne!(floor.tone_at(-0.5, -15.0), floor.tone_at(0.5, -15.0));
    }

    #[test]
    fn floor_material_keeps_base_parameters() {
        let floor = Checkerboard::default();
        let material = floor.material_at(&Point3::new(0.5, -4.0, -15.0));
        assert_eq!(material.diffuse, floor.base.diffuse);
        assert_eq!(material.reflectivity, 0.0);
        assert!(material.color == floor.odd_tone || material.color == floor.even_tone);
    }

    #[test]
    fn floor_bounds() {
        let floor = Checkerboard::default();
        assert!(floor.contains(&Point3::new(0.0, -4.0, -20.0)));
        assert!(!floor.contains(&Point3::new(10.5, -4.0, -20.0)));
        assert!(!floor.contains(&Point3::new(0.0, -4.0, -5.0)));
        assert!(!floor.contains(&Point3::new(0.0, -4.0, -31.0)));
    }

    #[test]
    fn loose_material_is_accepted() {
        assert!(Material::ivory().is_energy_conserving());
        assert!(Material::mirror().is_energy_conserving());
        assert!(Material::glass().is_energy_conserving());

        let loose = Material::new(Vector3::new(1.0, 1.0, 1.0), 0.0, 0.0, 1.0, 0.8, 0.8, 1.5);
        assert!(!loose.is_energy_conserving());
        let scene = Scene::new(vec![Sphere::new(Point3::origin(), 1.0, loose)], vec![], None);
        assert_eq!(scene.spheres.len(), 1);
    }

    #[test]
    fn demo_scene_layout() {
        let scene = Scene::demo();
        assert_eq!(scene.spheres.len(), 4);
        assert_eq!(scene.lights.len(), 3);
        assert!(scene.floor.is_some());
    }
}

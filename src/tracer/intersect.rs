use nalgebra::{Point3, Unit, Vector3};

use crate::tracer::ray::Ray;
use crate::tracer::scene::{Checkerboard, Material, Scene, Sphere};

/// HitPayload는 부딪힌 지점에 대한 정보만 담음. 색은 나중에 셰이딩 단계에서 계산함.
#[derive(Debug, Clone)]
pub struct HitPayload {
    pub distance: f32,
    pub position: Point3<f32>,
    pub normal: Unit<Vector3<f32>>,
    pub material: Material,
}

impl Sphere {
    /// 광선과 구가 처음 만나는 거리.
    ///
    /// 카메라가 구 안에 있으면 가까운 근이 음수이므로 먼 근을 대신 씀. 둘 다 음수면 `None`.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        // 반지름이 0 이하인 구는 그냥 안 보이는 것으로 취급
        if self.radius <= 0.0 {
            return None;
        }

        // l = 광선 원점에서 구 중심까지
        // tca = l을 광선 방향으로 투영한 길이
        // d2 = 구 중심과 광선 사이 거리의 제곱
        let l = self.center - ray.origin;
        let tca = l.dot(ray.direction.as_ref());
        let d2 = l.magnitude_squared() - tca * tca;
        let r2 = self.radius * self.radius;
        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        let near = tca - thc;
        let far = tca + thc;

        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }

    pub fn closest_hit(&self, ray: &Ray, distance: f32) -> HitPayload {
        let position = ray.at(distance);
        let normal = Unit::new_normalize(position - self.center);

        HitPayload {
            distance,
            position,
            normal,
            material: self.material,
        }
    }
}

impl Checkerboard {
    // 광선이 평면과 거의 평행하면 무시
    const PARALLEL_LIMIT: f32 = 1e-3;

    pub fn intersect(&self, ray: &Ray) -> Option<HitPayload> {
        if ray.direction.y.abs() <= Self::PARALLEL_LIMIT {
            return None;
        }

        let distance = (self.height - ray.origin.y) / ray.direction.y;
        if distance <= 0.0 {
            return None;
        }

        let position = ray.at(distance);
        if !self.contains(&position) {
            return None;
        }

        Some(HitPayload {
            distance,
            position,
            normal: Vector3::y_axis(),
            material: self.material_at(&position),
        })
    }
}

impl Scene {
    /// 모든 구와 바닥을 하나씩 검사해 가장 가까운 교차점을 찾음. 거리가 같으면 먼저 검사한 물체가 이김.
    pub fn intersect(&self, ray: &Ray) -> Option<HitPayload> {
        let mut closest: Option<(&Sphere, f32)> = None;
        for sphere in &self.spheres {
            let Some(distance) = sphere.intersect(ray) else {
                continue;
            };

            match closest {
                Some((_, previous_distance)) if previous_distance <= distance => {}
                _ => closest = Some((sphere, distance)),
            }
        }

        let sphere_distance = closest.map_or(f32::MAX, |(_, distance)| distance);
        let floor_hit = self
            .floor
            .as_ref()
            .and_then(|floor| floor.intersect(ray))
            .filter(|hit| hit.distance < sphere_distance);

        floor_hit.or_else(move || closest.map(|(sphere, distance)| sphere.closest_hit(ray, distance)))
    }
}

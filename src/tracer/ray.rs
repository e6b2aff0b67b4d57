use nalgebra::{Point3, Unit, Vector3};

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Unit<Vector3<f32>>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction.as_ref() * distance
    }

    /// 표면에서 출발하는 2차 광선. 자기 자신과 다시 부딪히지 않도록 나가는 방향 쪽으로 원점을 살짝 밀어줌.
    pub fn offset(
        point: Point3<f32>,
        normal: &Unit<Vector3<f32>>,
        direction: Unit<Vector3<f32>>,
        epsilon: f32,
    ) -> Self {
        let shift = normal.as_ref() * epsilon;
        let origin = if direction.dot(normal.as_ref()) < 0.0 {
            point - shift
        } else {
            point + shift
        };

        Self { origin, direction }
    }
}

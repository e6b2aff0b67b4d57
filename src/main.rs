use anyhow::Context;

fn main() -> anyhow::Result<()> {
    whitted::run().context("렌더링 실패")
}

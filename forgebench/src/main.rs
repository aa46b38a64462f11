fn main() -> anyhow::Result<()> {
    forgebench::run()
}

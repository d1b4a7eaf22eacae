fn main() -> anyhow::Result<()> {
    medisafe_lib::run()
}

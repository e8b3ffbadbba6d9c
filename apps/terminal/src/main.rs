fn main() -> anyhow::Result<()> {
    roster_drill_terminal::run()
}

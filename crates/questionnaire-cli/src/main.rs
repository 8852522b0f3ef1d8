fn main() -> anyhow::Result<()> {
    questionnaire_cli::cli::main()
}

use super::*;

#[test]
fn parses_articles_command_with_brand() {
    let cli = Cli::try_parse_from(["brandscope-cli", "articles", "--brand", "Acme"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Articles { ref brand }) if brand == "Acme"
    ));
}

#[test]
fn parses_prompts_command_with_multi_word_brand() {
    let cli = Cli::try_parse_from(["brandscope-cli", "prompts", "--brand", "Blue Bottle"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Prompts { ref brand }) if brand == "Blue Bottle"
    ));
}

#[test]
fn parses_status_command() {
    let cli = Cli::try_parse_from(["brandscope-cli", "status"]).expect("expected valid cli args");

    assert!(matches!(cli.command, Some(Commands::Status)));
}

#[test]
fn articles_requires_brand() {
    assert!(Cli::try_parse_from(["brandscope-cli", "articles"]).is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["brandscope-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

use super::*;
use alloy_primitives::address;
use clap::Parser;

const PROFILE: &str = "0x1111111111111111111111111111111111111111";

#[test]
fn global_args_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tip-assistant",
        "show",
        "--profile",
        PROFILE,
        "--network",
        "mainnet",
        "--log-level",
        "info,tip_assistant=debug",
    ])
    .unwrap();

    assert_eq!(cli.args.network, Some(Network::Mainnet));
    assert_eq!(cli.args.log_level, vec!["info", "tip_assistant=debug"]);
    assert!(matches!(
        cli.command,
        Command::Show { profile } if profile == address!("0x1111111111111111111111111111111111111111")
    ));
}

#[test]
fn save_takes_raw_input() {
    // validation happens later, so the raw strings are kept as typed
    let cli = Cli::try_parse_from([
        "tip-assistant",
        "save",
        "--profile",
        PROFILE,
        "--destination",
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "--percentage",
        "10.5",
    ])
    .unwrap();

    match cli.command {
        Command::Save {
            destination,
            percentage,
            ..
        } => {
            assert_eq!(destination, "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
            assert_eq!(percentage, "10.5");
        }
        _ => panic!("expected save"),
    }
}

#[test]
fn rejects_bad_values() {
    assert!(Cli::try_parse_from(["tip-assistant", "show", "--profile", "0x1234"]).is_err());
    assert!(Cli::try_parse_from([
        "tip-assistant",
        "keys",
        "--network",
        "devnet"
    ])
    .is_err());
    // profile is required
    assert!(Cli::try_parse_from(["tip-assistant", "deactivate"]).is_err());
}

#[test]
fn grant_permissions_defaults() {
    let cli = Cli::try_parse_from(["tip-assistant", "grant-permissions", "--profile", PROFILE])
        .unwrap();

    assert!(matches!(
        cli.command,
        Command::GrantPermissions {
            controller: None,
            protocol_only: false,
            ..
        }
    ));
}

#[test]
fn credential_is_not_serialized_when_absent() {
    let cli = Cli::try_parse_from(["tip-assistant", "keys"]).unwrap();
    let json = serde_json::to_value(&cli.args).unwrap();
    assert_eq!(json, serde_json::json!({}));
}

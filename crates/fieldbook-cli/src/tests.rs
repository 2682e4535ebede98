use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["fieldbook-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert_eq!(cli.tz, "America/Los_Angeles");
}

#[test]
fn parses_check_date_with_region() {
    let cli = Cli::try_parse_from([
        "fieldbook-cli",
        "check-date",
        "--date",
        "2025-05-20",
        "--region",
        "bay_area",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::CheckDate { date, ref region })
            if date == NaiveDate::from_ymd_opt(2025, 5, 20).unwrap() && region == "bay_area"
    ));
}

#[test]
fn check_date_rejects_malformed_date() {
    let result = Cli::try_parse_from(["fieldbook-cli", "check-date", "--date", "20/05/2025"]);
    assert!(result.is_err());
}

#[test]
fn parses_slots_with_repeated_dates() {
    let cli = Cli::try_parse_from([
        "fieldbook-cli",
        "slots",
        "--order-no",
        "SO-100",
        "--address",
        "14th St, Vallejo, CA 94590, USA",
        "--date",
        "2025-05-20",
        "--date",
        "2025-05-21",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Slots {
            order_no,
            dates,
            region,
            ..
        }) => {
            assert_eq!(order_no, "SO-100");
            assert_eq!(dates.len(), 2);
            assert!(region.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn slots_requires_a_date() {
    let result = Cli::try_parse_from([
        "fieldbook-cli",
        "slots",
        "--order-no",
        "SO-100",
        "--address",
        "1 Main St",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_reserve_force_continue_flag() {
    let cli = Cli::try_parse_from([
        "fieldbook-cli",
        "reserve",
        "--reservation-id",
        "r-1",
        "--force-continue",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Reserve {
            force_continue: true,
            ..
        })
    ));
}

#[test]
fn parses_order_delete() {
    let cli = Cli::try_parse_from(["fieldbook-cli", "order", "delete", "--order-no", "TEMP1ABCDEF"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Order {
            command: OrderCommands::Delete { ref order_no }
        }) if order_no == "TEMP1ABCDEF"
    ));
}

#[test]
fn global_tz_flag_is_accepted_after_subcommand() {
    let cli = Cli::try_parse_from([
        "fieldbook-cli",
        "windows",
        "--region",
        "phoenix_metro",
        "--tz",
        "America/Phoenix",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.tz, "America/Phoenix");
}

#[test]
fn slot_args_build_a_text_address_request() {
    let request = booking::SlotArgs {
        order_no: "SO-100".to_string(),
        address: "14th St, Vallejo, CA 94590, USA".to_string(),
        dates: vec![NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()],
        region: Some("bay_area".to_string()),
        customer_name: None,
    }
    .into_request();

    assert_eq!(request.slots.dates, ["2025-05-20"]);
    assert!(request.slots.time_windows.is_empty());
    assert!(matches!(
        request.order.address,
        Some(fieldbook_booking::AddressInput::Text(_))
    ));
}

#[test]
fn schedule_helpers_validate_inputs() {
    assert!(schedule::parse_tz("America/Los_Angeles").is_ok());
    assert!(schedule::parse_tz("Mars/Olympus").is_err());
    assert!(schedule::parse_region("phoenix-west").is_ok());
    assert!(schedule::parse_region("atlantis").is_err());
}

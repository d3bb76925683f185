use anyhow::{anyhow, Context};
use clap::{Arg, ArgMatches, Command};
use primitive_types::{H160, U256};
use zarp_ledger::{parse_address, LedgerEvent, LedgerStorage, LogicV1, Role, ZarpToken};

fn address_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help).required(true)
}

fn caller_arg() -> Arg {
    address_arg("caller", "Address performing the operation (hex)")
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .help("Token amount in base units")
        .required(true)
}

fn role_arg() -> Arg {
    Arg::new("role")
        .long("role")
        .help("Role name (admin, minter, pauser, upgrader, verifier, burner)")
        .required(true)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = Command::new("zarp-cli")
        .version(zarp_ledger::VERSION)
        .about("ZARP Ledger Command Line Interface")
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .help("Ledger data directory")
                .global(true)
                .default_value("./zarp-data"),
        )
        .subcommand(
            Command::new("init")
                .about("Initialize the ledger and grant Admin to the caller")
                .arg(caller_arg()),
        )
        .subcommand(
            Command::new("grant-role")
                .about("Grant a role to an account (Admin only)")
                .arg(caller_arg())
                .arg(role_arg())
                .arg(address_arg("account", "Account receiving the role (hex)")),
        )
        .subcommand(
            Command::new("revoke-role")
                .about("Revoke a role from an account (Admin only)")
                .arg(caller_arg())
                .arg(role_arg())
                .arg(address_arg("account", "Account losing the role (hex)")),
        )
        .subcommand(
            Command::new("verify")
                .about("Mark an account as verified (Verifier only)")
                .arg(caller_arg())
                .arg(address_arg("account", "Account to verify (hex)")),
        )
        .subcommand(
            Command::new("remove-verification")
                .about("Clear an account's verified flag (Verifier only)")
                .arg(caller_arg())
                .arg(address_arg("account", "Account to unverify (hex)")),
        )
        .subcommand(
            Command::new("mint")
                .about("Mint tokens to a verified account (Minter only)")
                .arg(caller_arg())
                .arg(address_arg("to", "Recipient address (hex)"))
                .arg(amount_arg()),
        )
        .subcommand(
            Command::new("transfer")
                .about("Transfer tokens from the caller's balance")
                .arg(caller_arg())
                .arg(address_arg("to", "Recipient address (hex)"))
                .arg(amount_arg()),
        )
        .subcommand(
            Command::new("burn")
                .about("Burn tokens from the caller's own balance (Burner only)")
                .arg(caller_arg())
                .arg(amount_arg()),
        )
        .subcommand(
            Command::new("balance")
                .about("Show an account balance")
                .arg(address_arg("account", "Account to query (hex)")),
        )
        .subcommand(Command::new("supply").about("Show the total supply"))
        .subcommand(
            Command::new("is-verified")
                .about("Show an account's verification flag")
                .arg(address_arg("account", "Account to query (hex)")),
        )
        .subcommand(
            Command::new("has-role")
                .about("Show whether an account holds a role")
                .arg(role_arg())
                .arg(address_arg("account", "Account to query (hex)")),
        )
        .subcommand(Command::new("info").about("Dump the full ledger state as JSON"))
        .get_matches();

    let data_dir = matches.get_one::<String>("data-dir").unwrap();
    let storage = LedgerStorage::open(data_dir)
        .with_context(|| format!("opening ledger at {data_dir}"))?;
    let state = storage.load()?.unwrap_or_default();
    let mut token = ZarpToken::from_state(state, Box::new(LogicV1));

    match matches.subcommand() {
        Some(("init", sub)) => {
            token.initialize(get_address(sub, "caller")?)?;
            storage.save(token.state())?;
            println!("Initialized {} ({})", token.name(), token.symbol());
            Ok(())
        }
        Some(("grant-role", sub)) => {
            let event = token.grant_role(
                get_address(sub, "caller")?,
                get_role(sub)?,
                get_address(sub, "account")?,
            )?;
            storage.save(token.state())?;
            print_event(&event)
        }
        Some(("revoke-role", sub)) => {
            let event = token.revoke_role(
                get_address(sub, "caller")?,
                get_role(sub)?,
                get_address(sub, "account")?,
            )?;
            storage.save(token.state())?;
            print_event(&event)
        }
        Some(("verify", sub)) => {
            let event = token.verify(get_address(sub, "caller")?, get_address(sub, "account")?)?;
            storage.save(token.state())?;
            print_event(&event)
        }
        Some(("remove-verification", sub)) => {
            let event =
                token.remove_verification(get_address(sub, "caller")?, get_address(sub, "account")?)?;
            storage.save(token.state())?;
            print_event(&event)
        }
        Some(("mint", sub)) => {
            let event = token.mint(
                get_address(sub, "caller")?,
                get_address(sub, "to")?,
                get_amount(sub)?,
            )?;
            storage.save(token.state())?;
            print_event(&event)
        }
        Some(("transfer", sub)) => {
            let event = token.transfer(
                get_address(sub, "caller")?,
                get_address(sub, "to")?,
                get_amount(sub)?,
            )?;
            storage.save(token.state())?;
            print_event(&event)
        }
        Some(("burn", sub)) => {
            let event = token.burn(get_address(sub, "caller")?, get_amount(sub)?)?;
            storage.save(token.state())?;
            print_event(&event)
        }
        Some(("balance", sub)) => {
            println!("{}", token.balance_of(get_address(sub, "account")?));
            Ok(())
        }
        Some(("supply", _)) => {
            println!("{}", token.total_supply());
            Ok(())
        }
        Some(("is-verified", sub)) => {
            println!("{}", token.is_verified(get_address(sub, "account")?));
            Ok(())
        }
        Some(("has-role", sub)) => {
            println!(
                "{}",
                token.has_role(get_role(sub)?, get_address(sub, "account")?)
            );
            Ok(())
        }
        Some(("info", _)) => {
            println!("{}", serde_json::to_string_pretty(token.state())?);
            Ok(())
        }
        _ => {
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn get_address(matches: &ArgMatches, name: &str) -> anyhow::Result<H160> {
    let raw = matches.get_one::<String>(name).unwrap();
    Ok(parse_address(raw)?)
}

fn get_amount(matches: &ArgMatches) -> anyhow::Result<U256> {
    let raw = matches.get_one::<String>("amount").unwrap();
    U256::from_dec_str(raw).map_err(|e| anyhow!("invalid amount {raw}: {e}"))
}

fn get_role(matches: &ArgMatches) -> anyhow::Result<Role> {
    let raw = matches.get_one::<String>("role").unwrap();
    raw.parse::<Role>().map_err(|e| anyhow!(e))
}

fn print_event(event: &LedgerEvent) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

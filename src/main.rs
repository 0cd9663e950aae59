//! fortuna - roll a dice expression once, or run a console session of roll and initiative commands alongside the
//! liveness endpoint.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Result;
use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use clap::Parser;
use fortuna::{
	command::{self, Command, CommandError},
	dice::roller::FastRand as FastRandRoller,
	parse, server, InitiativeStore,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Dice roller for expressions like 2d20kh1+4, with initiative tracking
#[derive(Parser, Debug)]
#[command(name = "fortuna", version, about)]
struct Args {
	/// Expression to roll once and exit. Without one, commands are read from stdin.
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	expression: Vec<String>,

	/// Port for the liveness endpoint
	#[arg(long, env = "PORT", default_value_t = 10000)]
	port: u16,

	/// Room that the console session rolls initiative in
	#[arg(long, default_value_t = 0)]
	room: u64,

	/// Name to roll as when a command doesn't give one
	#[arg(long, env = "USER", default_value = "adventurer")]
	name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "fortuna=info".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	let args = Args::parse();

	if !args.expression.is_empty() {
		// Combine all of the args so the expression can be left unquoted even with spaces
		let expression = args.expression.join(" ");
		match command::roll(&mut FastRandRoller::default(), &args.name, &expression) {
			Ok(reply) => println!("{reply}"),
			Err(err) => report(&expression, &err),
		}
		return Ok(());
	}

	let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port));
	tokio::spawn(async move {
		if let Err(err) = server::serve(addr).await {
			tracing::error!(%err, "liveness server stopped");
		}
	});

	let store = InitiativeStore::new();
	let mut lines = BufReader::new(io::stdin()).lines();
	while let Some(line) = lines.next_line().await? {
		if line.trim().is_empty() {
			continue;
		}

		let command = match line.parse::<Command>() {
			Ok(command) => command,
			Err(err) => {
				eprintln!("{err}");
				continue;
			}
		};

		// Every command gets its own roller
		match command.execute(&store, &mut FastRandRoller::default(), args.room, &args.name) {
			Ok(response) => println!("{response}\n"),
			Err(err) => report(expression_of(&command), &err),
		}
	}

	Ok(())
}

/// Gets the expression a command rolls, if it rolls one.
fn expression_of(command: &Command) -> &str {
	match command {
		Command::Roll { expression } | Command::Initiative { expression, .. } => expression,
		_ => "",
	}
}

/// Shows a command error to the requester, pointing at the offending term when there is one.
fn report(expression: &str, err: &CommandError) {
	if err.is_informational() {
		println!("{err}\n");
		return;
	}

	let span = match err {
		CommandError::Validation(invalid) => invalid.span(),
		_ => None,
	};
	let Some(span) = span else {
		eprintln!("{err}");
		return;
	};

	let result = Report::build(ReportKind::Error, ("expression", span.clone()))
		.with_config(Config::default().with_index_type(IndexType::Byte))
		.with_message(err)
		.with_label(Label::new(("expression", span)).with_message("this term"))
		.finish()
		.eprint(("expression", Source::from(parse::normalize(expression))));

	if let Err(io_err) = result {
		tracing::warn!(%io_err, "couldn't print error report");
		eprintln!("{err}");
	}
}

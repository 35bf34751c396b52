mod cli;

use crate::cli::{Cli, Command};

use anyhow::{Context, Result};
use clap::Parser;
use person_repo::{config, mongo, Config, NewPerson, PersonRepository};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = Config::from_env_with(|key| match key {
        config::MONGO_URI_VAR => args.mongo_uri.clone(),
        config::MONGO_DB_VAR => args.db.clone(),
        _ => None,
    })?;

    let client = mongo::connect(&config.mongo_uri).await?;
    let db = mongo::database(&client, config.database.as_deref());
    mongo::ping(&db).await?;

    let outcome = {
        let repo = PersonRepository::new(&db);
        run(&repo, args.command).await
    };

    drop(db);
    client.shutdown().await;
    outcome
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(repo: &PersonRepository, command: Command) -> Result<()> {
    match command {
        Command::Create { name, age, foods } => print_json(&repo.create_record(&name, age, foods).await?),
        Command::CreateMany { input } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input))?;
            let people: Vec<NewPerson> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON array of people", input))?;
            print_json(&repo.create_many_records(people).await?)
        }
        Command::FindByName { name } => print_json(&repo.find_people_by_name(&name).await?),
        Command::FindByFood { food } => print_json(&repo.find_one_person_by_food(&food).await?),
        Command::FindById { id } => print_json(&repo.find_person_by_id(&id).await?),
        Command::AddFood { id, food } => print_json(&repo.find_edit_then_save(&id, &food).await?),
        Command::SetAge { name, age } => print_json(&repo.find_and_update(&name, age).await?),
        Command::RemoveById { id } => print_json(&repo.remove_by_id(&id).await?),
        Command::RemoveByName { name } => print_json(&repo.remove_many_people(&name).await?),
        Command::Burritos => print_json(&repo.chain_query_helpers().await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

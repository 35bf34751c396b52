// src/bin/person-cli/cli.rs
use clap::{Parser, Subcommand};

/// CLI arguments for person-cli
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// MongoDB connection string (overrides MONGO_URI)
    #[arg(long)]
    pub mongo_uri: Option<String>,

    /// Database name (overrides MONGO_DB, defaults to the one in the URI)
    #[arg(long)]
    pub db: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create one person
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: Option<i32>,
        /// Favorite food, repeatable
        #[arg(long = "food")]
        foods: Vec<String>,
    },
    /// Create every person listed in a JSON array file
    CreateMany {
        #[arg(long)]
        input: String,
    },
    /// List people with this exact name
    FindByName { name: String },
    /// Show one person who likes this food
    FindByFood { food: String },
    /// Show the person with this id
    FindById { id: String },
    /// Append a favorite food to a person
    AddFood { id: String, food: String },
    /// Set the age of the first person with this name
    SetAge { name: String, age: i32 },
    /// Remove the person with this id
    RemoveById { id: String },
    /// Remove every person with this name
    RemoveByName { name: String },
    /// Show up to two burrito lovers, sorted by name
    Burritos,
}

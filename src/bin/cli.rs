use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::error::Error;
use std::path::PathBuf;

use trivia_api::db;
use trivia_api::db::queries::{categories, questions};
use trivia_api::settings::Settings;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories and questions from a directory of CSV files
    Import { path: PathBuf },
    /// Export categories and questions to a directory of CSV files
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    match cli.command {
        Commands::Export { path } => export_data(path).await.expect("Cannot export"),
        Commands::Import { path } => import_data(path).await.expect("Cannot import"),
    }
}

async fn connect() -> Result<SqlitePool, Box<dyn Error>> {
    let settings = Settings::load()?;
    let pool = db::establish_connection(&settings.database_path).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}

fn write_to(path: PathBuf, data: Vec<impl Serialize>) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: PathBuf) -> Result<Vec<T>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record?;
        out.push(record);
    }
    Ok(out)
}

async fn export_data(path: PathBuf) -> Result<(), Box<dyn Error>> {
    let pool = connect().await?;
    let categories = categories::get_all_categories(&pool).await?;
    let questions = questions::get_all_questions(&pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(&path)?
    }
    write_to(path.clone().join("categories.csv"), categories)?;
    write_to(path.clone().join("questions.csv"), questions)?;
    Ok(())
}

async fn import_data(path: PathBuf) -> Result<(), Box<dyn Error>> {
    let pool = connect().await?;

    let categories: Vec<db::Category> = read_from(path.clone().join("categories.csv"))?;
    let questions: Vec<db::Question> = read_from(path.clone().join("questions.csv"))?;
    categories::import_categories(&pool, categories).await?;
    questions::import_questions(&pool, questions).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_api::db::{Category, Question};

    #[test]
    fn csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let categories = vec![
            Category {
                id: 1,
                label: "Science".to_owned(),
            },
            Category {
                id: 2,
                label: "Art".to_owned(),
            },
        ];
        let questions = vec![Question {
            id: 7,
            question: "What is the chemical symbol for gold?".to_owned(),
            answer: "Au".to_owned(),
            category: 1,
            difficulty: 2,
        }];

        write_to(dir.path().join("categories.csv"), categories).unwrap();
        write_to(dir.path().join("questions.csv"), questions).unwrap();

        let categories: Vec<Category> = read_from(dir.path().join("categories.csv")).unwrap();
        let questions: Vec<Question> = read_from(dir.path().join("questions.csv")).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].label, "Science");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, 7);
        assert_eq!(questions[0].answer, "Au");
    }
}

use std::{
    collections::BTreeSet,
    io::{
        self,
        BufRead,
        Write,
    },
};

use glosor::{
    core::tasks::{
        TaskManager,
        TaskResult,
    },
    persistence::{
        JsonFileStore,
        Settings,
    },
    session::AnswerLedger,
    GlosorError,
    QuizApp,
    VocabCommand,
};
use rand::rngs::ThreadRng;

type App = QuizApp<JsonFileStore, ThreadRng>;

const HELP: &str = "\
Answer with the option number, or:
  :restart            start the quiz over
  :filter a,b         only ask words in these groups (empty clears)
  :tags               list word groups
  :vocab              list the vocabulary with indices
  :export             print the selected words as JSON
  :import URL [a,b]   merge a vocabulary from URL, tagging it with groups
  :stats              show statistics for this run
  #{json}             send a raw vocabulary command
  :quit";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GlosorError> {
    let settings = Settings::load();
    let storage = JsonFileStore::open_default();
    log::info!("Using storage at {}", storage.path().display());

    let filter: BTreeSet<String> = settings.default_filter.iter().cloned().collect();
    let mut app: App = QuizApp::new(storage, filter, rand::rng())?;
    let mut tasks = TaskManager::new(&settings);

    println!("{HELP}");
    show_question(&app);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        if input == ":quit" {
            break;
        }
        handle_input(&mut app, &mut tasks, input);

        for e in app.process_pending_commands() {
            println!("{e}");
        }
        show_question(&app);
    }

    Ok(())
}

fn handle_input(app: &mut App, tasks: &mut TaskManager, input: &str) {
    if let Some(payload) = input.strip_prefix('#') {
        if let Err(e) = app.command_sender().submit_json(payload) {
            println!("{e}");
        }
        return;
    }

    let (command, rest) = input.split_once(' ').unwrap_or((input, ""));
    match command {
        "" => {}
        ":restart" => {
            app.restart();
        }
        ":filter" => {
            app.set_filter(parse_tags(rest).into_iter().collect());
        }
        ":tags" => {
            let tags: Vec<String> = app.available_tags().into_iter().map(|t| t.label).collect();
            println!("Word groups: {}", tags.join(", "));
        }
        ":vocab" => {
            for (i, glosa) in app.vocabulary().iter().enumerate() {
                let tags = glosa.tags.join(", ");
                println!("{:>3}  {:<20} {:<20} {}", i, glosa.words.0, glosa.words.1, tags);
            }
        }
        ":export" => match app.export() {
            Ok(json) => println!("{json}"),
            Err(e) => println!("{e}"),
        },
        ":import" => {
            let (url, tags) = rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));
            if url.is_empty() {
                println!("Usage: :import URL [group,...]");
                return;
            }
            tasks.import_vocabulary(url.to_string(), parse_tags(tags), app.vocabulary().to_vec());
            wait_for_import(app, tasks);
        }
        ":stats" => show_stats(app.ledger()),
        ":help" => println!("{HELP}"),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => match app.answer(n - 1) {
                Some(answered) if answered.is_correct() => println!("Correct!"),
                Some(answered) => println!("Wrong, it was {}", answered.prompt),
                None => println!("No such option"),
            },
            _ => println!("Unknown input, try :help"),
        },
    }
}

fn wait_for_import(app: &App, tasks: &mut TaskManager) {
    while let Some(result) = tasks.wait_result() {
        match result {
            TaskResult::LoadingMessage(message) => println!("{message}"),
            TaskResult::ImportFinished { url, result } => {
                match result {
                    Ok(merged) => {
                        let count = merged.len();
                        match app.command_sender().submit(VocabCommand::BulkReplace(merged)) {
                            Ok(()) => println!("Imported {url} ({count} words in total)"),
                            Err(e) => println!("{e}"),
                        }
                    }
                    Err(message) => println!("{message}"),
                }
                return;
            }
        }
    }
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}

fn show_question(app: &App) {
    let session = app.session();
    if session.is_complete() {
        println!();
        show_stats(app.ledger());
        println!("Quiz complete. Type :restart to go again.");
        return;
    }

    let Some(question) = session.question() else {
        return;
    };
    if let Some((position, total)) = session.progress() {
        println!();
        println!("Answer the question below (question {position} out of {total})");
    }
    println!("What does the word mean: {}?", question.prompt());
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}) {}", i + 1, option.word(question.answer_side()));
    }
    print!("> ");
    let _ = io::stdout().flush();
}

fn show_stats(ledger: &AnswerLedger) {
    println!("Overall performance {}", ledger.overall_score());
    println!("Latest quiz {}", ledger.latest_run_score());

    let rows = ledger.per_word_breakdown();
    if rows.is_empty() {
        return;
    }
    println!(
        "{:<20} {:<20} {:<30} {:>7} {:>8}",
        "Word to translate", "Correct translation", "Your most frequent answer", "Answers", "Accuracy"
    );
    for row in rows {
        println!(
            "{:<20} {:<20} {:<30} {:>7} {:>8}",
            row.glosa.words.0,
            row.glosa.words.1,
            row.most_frequent_answer.to_string(),
            row.times_asked,
            row.accuracy_display()
        );
    }
}

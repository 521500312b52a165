use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use learnswift::content::{SearchHit, daily_index};
use learnswift::quiz::{answer_indices, option_index};
use learnswift::tracking::{CheckIn, streak};
use learnswift::{App, Config, ResetScope};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "learnswift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding learner data (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress, quiz stats, streak and bookmarks
    Status,
    /// Check in for today
    CheckIn,
    /// List lessons with completion and bookmark markers
    Lessons,
    /// Mark a lesson as completed without taking its quiz
    Complete {
        /// Lesson id
        lesson: u32,
    },
    /// Submit answers for a lesson quiz (option numbers, starting at 1)
    Quiz {
        /// Lesson id
        lesson: u32,
        /// One answer per question, in order
        #[arg(required = true)]
        answers: Vec<usize>,
    },
    /// Toggle a bookmark
    Bookmark {
        #[command(subcommand)]
        target: BookmarkTarget,
    },
    /// List bookmarked lessons and glossary terms
    Bookmarks,
    /// Search lessons, glossary terms and the cheat sheet
    Search {
        /// Text to look for
        query: String,
    },
    /// Review flashcards
    Flashcards {
        /// Only show cards in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Look up a compiler error in plain English
    Errors {
        /// Part of the error message or fix; lists every entry when omitted
        query: Option<String>,
    },
    /// Show the syntax cheat sheet
    CheatSheet,
    /// Show today's challenge, or answer it
    Challenge {
        /// Option number, starting at 1
        #[arg(short, long)]
        answer: Option<usize>,
    },
    /// Show the tip of the day
    Tip,
    /// Erase learner data
    Reset {
        #[arg(value_enum, default_value_t = ResetTarget::All)]
        target: ResetTarget,
    },
}

#[derive(Subcommand)]
enum BookmarkTarget {
    /// Bookmark a lesson by id
    Lesson { id: u32 },
    /// Bookmark a glossary term by name
    Term { name: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResetTarget {
    Progress,
    Stats,
    Streak,
    Bookmarks,
    Challenge,
    All,
}

impl From<ResetTarget> for ResetScope {
    fn from(target: ResetTarget) -> Self {
        match target {
            ResetTarget::Progress => Self::Progress,
            ResetTarget::Stats => Self::Stats,
            ResetTarget::Streak => Self::Streak,
            ResetTarget::Bookmarks => Self::Bookmarks,
            ResetTarget::Challenge => Self::Challenge,
            ResetTarget::All => Self::All,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnswift=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir;
    }

    let today = streak::today();
    let mut app = App::open(&config)?;
    let started = app.start_on(today).unwrap_or_else(|e| {
        tracing::error!("Daily check-in failed: {}", e);
        None
    });

    let width = config.wrap_width;
    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => println!("{}", app.profile_on(today)),
        Commands::CheckIn => {
            let outcome = match started {
                Some(outcome) => outcome,
                None => app.streak_mut().check_in_on(today)?,
            };
            let streak = app.streak().current_streak();
            match outcome {
                CheckIn::AlreadyToday => {
                    println!("Already checked in today ({} day streak)", streak)
                }
                CheckIn::Broken => println!("Streak restarted. Day 1 again!"),
                CheckIn::First | CheckIn::Continued => {
                    println!("Checked in: {} day streak", streak)
                }
            }
        }
        Commands::Lessons => {
            for lesson in app.catalog().lessons() {
                let done = marker(app.progress().is_completed(lesson.id), 'x');
                let mark = marker(app.bookmarks().is_lesson_bookmarked(lesson.id), '*');
                println!(
                    "[{}]{} {:>2}. {} - {} ({}, {} min)",
                    done,
                    mark,
                    lesson.id,
                    lesson.title,
                    lesson.subtitle,
                    lesson.difficulty.label(),
                    lesson.estimated_minutes
                );
            }
        }
        Commands::Complete { lesson } => {
            if app.catalog().lesson(lesson).is_none() {
                tracing::warn!("Lesson {} is not in the catalog", lesson);
            }
            app.mark_completed(lesson)?;
            println!("Lesson {} marked as completed", lesson);
        }
        Commands::Quiz { lesson, answers } => {
            let Some(quiz) = app.catalog().lesson(lesson) else {
                bail!("No lesson with id {}", lesson);
            };
            let answers = answer_indices(quiz, &answers)?;
            if let Some((outcome, passed)) = app.finish_quiz(lesson, &answers)? {
                println!("{}/{} correct", outcome.correct, outcome.total);
                if passed {
                    println!("Lesson complete!");
                } else {
                    println!("Keep practicing. Review the lesson and try again.");
                }
            }
        }
        Commands::Bookmark { target } => match target {
            BookmarkTarget::Lesson { id } => {
                let on = app.toggle_lesson_bookmark(id)?;
                println!("Lesson {} {}", id, bookmark_state(on));
            }
            BookmarkTarget::Term { name } => {
                let on = app.toggle_term_bookmark(&name)?;
                println!("'{}' {}", name, bookmark_state(on));
            }
        },
        Commands::Bookmarks => {
            let lessons = app.bookmarks().bookmarked_lessons();
            let terms = app.bookmarks().bookmarked_terms();
            if lessons.is_empty() && terms.is_empty() {
                println!("No bookmarks yet");
            }
            for lesson in lessons {
                println!("Lesson {:>2}. {}", lesson.id, lesson.title);
            }
            for term in terms {
                println!("Term      {} - {}", term.term, term.one_liner);
            }
        }
        Commands::Search { query } => {
            let hits = app.catalog().search(&query);
            if hits.is_empty() {
                println!("No results for '{}'", query);
            }
            for hit in hits {
                match hit {
                    SearchHit::Lesson(l) => println!("Lesson {:>2}. {}", l.id, l.title),
                    SearchHit::Term(t) => println!("Term      {} - {}", t.term, t.one_liner),
                    SearchHit::CheatSheet { section, item } => {
                        let label = format!("{} / {}", section.title, item.label);
                        println!("Cheat     {}: {}", label, item.syntax);
                    }
                }
            }
        }
        Commands::Flashcards { category } => {
            let cards = app.catalog().flashcards_in(category.as_deref());
            if cards.is_empty() {
                let known = app.catalog().flashcard_categories().join(", ");
                bail!("No flashcards in that category (available: {})", known);
            }
            for card in cards {
                println!("[{}] {}", card.category, card.front);
                println!("{}\n", textwrap::indent(&card.back, "    "));
            }
        }
        Commands::Errors { query } => {
            let query = query.unwrap_or_default();
            let entries = app.catalog().search_errors(&query);
            if entries.is_empty() {
                println!("No matching errors");
            }
            for entry in entries {
                println!("{} {}", entry.emoji, entry.error_message);
                println!("{}", textwrap::fill(&entry.plain_english, width));
                println!("Fix: {}\n", textwrap::fill(&entry.how_to_fix, width));
            }
        }
        Commands::CheatSheet => {
            for section in &app.catalog().cheat_sheet {
                println!("{} {}", section.emoji, section.title);
                for item in &section.items {
                    match &item.note {
                        Some(note) => {
                            println!("  {:<16} {}  ({})", item.label, item.syntax, note)
                        }
                        None => println!("  {:<16} {}", item.label, item.syntax),
                    }
                }
                println!();
            }
        }
        Commands::Challenge { answer } => {
            let Some(challenge) = app.catalog().challenge_for(today).cloned() else {
                bail!("No daily challenges available");
            };
            let count = app.catalog().challenges.len();
            let index = daily_index(today, count).unwrap_or_default();
            println!("Daily challenge #{} ({})\n", index + 1, challenge.difficulty);
            println!("{}\n", textwrap::fill(&challenge.question, width));
            for (i, option) in challenge.options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }

            match answer {
                None if app.challenge().is_completed_on(today) => {
                    println!("\nAlready completed today. Come back tomorrow!");
                }
                None => {}
                Some(answer) => {
                    let options = challenge.options.len();
                    let Some(picked) = option_index(answer, options) else {
                        bail!("Answer {} is not an option (choose 1-{})", answer, options);
                    };
                    let verdict = if challenge.is_correct(picked) {
                        "Correct!"
                    } else {
                        "Not quite."
                    };
                    let explanation = textwrap::fill(&challenge.explanation, width);
                    println!("\n{}\n{}", verdict, explanation);
                    app.complete_challenge_on(today)?;
                }
            }
        }
        Commands::Tip => match app.catalog().tip_for(today) {
            Some(tip) => {
                println!("[{}]\n{}", tip.category, textwrap::fill(&tip.text, width))
            }
            None => println!("No tips available"),
        },
        Commands::Reset { target } => {
            app.reset(target.into())?;
            println!("Reset complete");
        }
    }

    Ok(())
}

fn marker(on: bool, symbol: char) -> char {
    if on {
        symbol
    } else {
        ' '
    }
}

fn bookmark_state(on: bool) -> &'static str {
    if on {
        "bookmarked"
    } else {
        "unbookmarked"
    }
}

//! Command-line front end: parses intents and drives the board.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};

use crate::auth::{Confirmation, WRONG_PASSWORD};
use crate::board::ClassBoard;
use crate::error::AppError;
use crate::models::{FileUpload, HomeworkDraft, MaterialDraft, NewsDraft, StudentDraft};
use crate::state::ClassState;
use crate::store::ClassStore;

/// Environment variable holding the admin password for gated commands.
pub const PASSWORD_ENV: &str = "CLASS_BOARD_PASSWORD";

/// Class information board: photo, roster, news, homework, and materials.
#[derive(Parser)]
#[command(name = "class-board", version)]
pub struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    pub dev: bool,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    pub config: Option<PathBuf>,

    /// Admin password for changes (falls back to CLASS_BOARD_PASSWORD, then a prompt)
    #[arg(long)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the board or one section of it
    Show {
        #[arg(value_enum, default_value_t = Section::All)]
        section: Section,
        /// Only show news and materials matching this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Manage news items
    News {
        #[command(subcommand)]
        action: NewsCommand,
    },
    /// Manage the class roster
    Students {
        #[command(subcommand)]
        action: StudentCommand,
    },
    /// Manage homework
    Homework {
        #[command(subcommand)]
        action: HomeworkCommand,
    },
    /// Manage downloadable materials
    Materials {
        #[command(subcommand)]
        action: MaterialCommand,
    },
    /// Replace or remove the class photo
    Photo {
        #[command(subcommand)]
        action: PhotoCommand,
    },
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Board section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    All,
    Photo,
    News,
    Students,
    Homework,
    Materials,
}

#[derive(Subcommand)]
pub enum NewsCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum StudentCommand {
    Add { name: String },
    Edit { id: i64, name: String },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum HomeworkCommand {
    Add {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        task: String,
        #[arg(long)]
        due: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        task: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum MaterialCommand {
    /// Upload a file as a new material
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        file: PathBuf,
        /// Reference to store instead of a file:// URL of the path
        #[arg(long)]
        file_url: Option<String>,
    },
    /// Change a material's title
    Edit {
        id: i64,
        #[arg(long)]
        title: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum PhotoCommand {
    /// Set the photo to an image reference (URL or data URL)
    Set { reference: String },
    Clear,
}

/// Admin password, asked for at most once per run.
pub struct Password {
    value: Option<String>,
}

impl Password {
    /// Use the flag value, else the environment; prompt lazily otherwise.
    pub fn new(flag: Option<String>) -> Self {
        Self {
            value: flag.or_else(|| std::env::var(PASSWORD_ENV).ok()),
        }
    }

    fn get(&mut self) -> anyhow::Result<String> {
        if let Some(value) = &self.value {
            return Ok(value.clone());
        }

        eprint!("Admin password: ");
        io::stderr().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let value = line.trim_end_matches(['\r', '\n']).to_string();
        self.value = Some(value.clone());
        Ok(value)
    }
}

/// Load the board from `store` and run one command against it.
pub async fn run<S: ClassStore>(store: S, command: Command, password: &mut Password) -> anyhow::Result<()> {
    let mut board = ClassBoard::load(store).await;

    match command {
        Command::Show { section, search } => {
            print_board(board.state(), section, search.as_deref().unwrap_or_default());
            Ok(())
        }
        Command::News { action } => news(&mut board, action, password).await,
        Command::Students { action } => students(&mut board, action, password).await,
        Command::Homework { action } => homework(&mut board, action, password).await,
        Command::Materials { action } => materials(&mut board, action, password).await,
        Command::Photo { action } => photo(&mut board, action, password).await,
        Command::InitConfig { .. } => bail!("init-config does not open the store"),
    }
}

/// Submit the password for whatever action is pending.
async fn authorize<S: ClassStore>(board: &mut ClassBoard<S>, password: &mut Password) -> anyhow::Result<()> {
    let secret = password.get()?;
    match board.confirm_authorization(&secret).await {
        Confirmation::Executed(result) => Ok(result?),
        Confirmation::Denied => {
            let message = board.gate().error().unwrap_or(WRONG_PASSWORD).to_string();
            board.cancel_authorization();
            bail!(message)
        }
        Confirmation::Idle => bail!("Nothing to authorize"),
    }
}

fn ensure_valid<S: ClassStore>(board: &ClassBoard<S>, accepted: bool) -> anyhow::Result<()> {
    if accepted {
        return Ok(());
    }
    let messages: Vec<String> = board
        .state()
        .form_errors
        .iter()
        .map(|(field, message)| format!("{}: {message}", field.key()))
        .collect();
    bail!("Invalid input: {}", messages.join("; "))
}

async fn news<S: ClassStore>(
    board: &mut ClassBoard<S>,
    action: NewsCommand,
    password: &mut Password,
) -> anyhow::Result<()> {
    match action {
        NewsCommand::Add { title, content } => {
            board.open_news_dialog();
            board.drafts_mut().news = NewsDraft { title, content };
            let accepted = board.submit_news();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            if let Some(item) = board.state().news.first() {
                println!("Added news #{}", item.id);
            }
        }
        NewsCommand::Edit { id, title, content } => {
            board.request_edit_news(id);
            authorize(board, password).await?;
            if !board.state().dialogs.news {
                return Err(AppError::not_found(format!("news #{id}")).into());
            }
            let draft = &mut board.drafts_mut().news;
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            let accepted = board.submit_news();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            println!("Updated news #{id}");
        }
        NewsCommand::Delete { id } => {
            board.request_delete_news(id);
            authorize(board, password).await?;
            println!("Deleted news #{id}");
        }
    }
    Ok(())
}

async fn students<S: ClassStore>(
    board: &mut ClassBoard<S>,
    action: StudentCommand,
    password: &mut Password,
) -> anyhow::Result<()> {
    match action {
        StudentCommand::Add { name } => {
            board.open_student_dialog();
            board.drafts_mut().student = StudentDraft { name };
            let accepted = board.submit_student();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            if let Some(student) = board.state().students.last() {
                println!("Added student #{}", student.id);
            }
        }
        StudentCommand::Edit { id, name } => {
            board.request_edit_student(id);
            authorize(board, password).await?;
            if !board.state().dialogs.student {
                return Err(AppError::not_found(format!("student #{id}")).into());
            }
            board.drafts_mut().student.name = name;
            let accepted = board.submit_student();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            println!("Updated student #{id}");
        }
        StudentCommand::Delete { id } => {
            board.request_delete_student(id);
            authorize(board, password).await?;
            println!("Deleted student #{id}");
        }
    }
    Ok(())
}

async fn homework<S: ClassStore>(
    board: &mut ClassBoard<S>,
    action: HomeworkCommand,
    password: &mut Password,
) -> anyhow::Result<()> {
    match action {
        HomeworkCommand::Add { subject, task, due } => {
            board.open_homework_dialog();
            board.drafts_mut().homework = HomeworkDraft { subject, task, due };
            let accepted = board.submit_homework();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            if let Some(item) = board.state().homework.first() {
                println!("Added homework #{}", item.id);
            }
        }
        HomeworkCommand::Edit {
            id,
            subject,
            task,
            due,
        } => {
            board.request_edit_homework(id);
            authorize(board, password).await?;
            if !board.state().dialogs.homework {
                return Err(AppError::not_found(format!("homework #{id}")).into());
            }
            let draft = &mut board.drafts_mut().homework;
            if let Some(subject) = subject {
                draft.subject = subject;
            }
            if let Some(task) = task {
                draft.task = task;
            }
            if let Some(due) = due {
                draft.due = due;
            }
            let accepted = board.submit_homework();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            println!("Updated homework #{id}");
        }
        HomeworkCommand::Delete { id } => {
            board.request_delete_homework(id);
            authorize(board, password).await?;
            println!("Deleted homework #{id}");
        }
    }
    Ok(())
}

async fn materials<S: ClassStore>(
    board: &mut ClassBoard<S>,
    action: MaterialCommand,
    password: &mut Password,
) -> anyhow::Result<()> {
    match action {
        MaterialCommand::Add { title, file, file_url } => {
            let upload = file_upload(&file, file_url)?;
            board.open_material_dialog();
            board.drafts_mut().material = MaterialDraft {
                title,
                file: Some(upload),
            };
            let accepted = board.submit_material();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            if let Some(item) = board.state().materials.first() {
                println!("Added material #{} ({}, {})", item.id, item.kind, item.size);
            }
        }
        MaterialCommand::Edit { id, title } => {
            board.request_edit_material(id);
            authorize(board, password).await?;
            if !board.state().dialogs.material {
                return Err(AppError::not_found(format!("material #{id}")).into());
            }
            board.drafts_mut().material.title = title;
            let accepted = board.submit_material();
            ensure_valid(board, accepted)?;
            authorize(board, password).await?;
            println!("Updated material #{id}");
        }
        MaterialCommand::Delete { id } => {
            board.request_delete_material(id);
            authorize(board, password).await?;
            println!("Deleted material #{id}");
        }
    }
    Ok(())
}

async fn photo<S: ClassStore>(
    board: &mut ClassBoard<S>,
    action: PhotoCommand,
    password: &mut Password,
) -> anyhow::Result<()> {
    match action {
        PhotoCommand::Set { reference } => {
            board.request_photo_update(Some(reference));
            authorize(board, password).await?;
            println!("Class photo updated");
        }
        PhotoCommand::Clear => {
            board.request_photo_update(None);
            authorize(board, password).await?;
            println!("Class photo removed");
        }
    }
    Ok(())
}

/// Describe a file on disk for upload.
fn file_upload(path: &Path, file_url: Option<String>) -> anyhow::Result<FileUpload> {
    let metadata = std::fs::metadata(path).with_context(|| format!("Cannot read {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let reference = match file_url {
        Some(url) => url,
        None => format!("file://{}", path.canonicalize()?.display()),
    };

    Ok(FileUpload {
        name,
        size_bytes: metadata.len(),
        reference,
    })
}

/// Long references (data URLs) are cut for display.
fn short_reference(reference: &str) -> String {
    const MAX: usize = 60;
    if reference.chars().count() <= MAX {
        reference.to_string()
    } else {
        let head: String = reference.chars().take(MAX - 3).collect();
        format!("{head}...")
    }
}

fn print_board(state: &ClassState, section: Section, query: &str) {
    let show = |s: Section| section == Section::All || section == s;

    if show(Section::Photo) {
        match &state.photo {
            Some(photo) => println!("Class photo: {}", short_reference(photo)),
            None => println!("Class photo: none"),
        }
    }

    if show(Section::News) {
        println!("\nNews");
        for item in state.search_news(query) {
            println!("  #{} [{}] {}", item.id, item.date, item.title);
            println!("      {}", item.content);
        }
    }

    if show(Section::Students) {
        println!("\nStudents ({})", state.students.len());
        for (n, student) in state.students.iter().enumerate() {
            println!("  {:>2}. {} (#{})", n + 1, student.name, student.id);
        }
    }

    if show(Section::Homework) {
        println!("\nHomework");
        for item in &state.homework {
            println!(
                "  #{} {}: {} (due {}, {})",
                item.id,
                item.subject,
                item.task,
                item.due,
                item.status.name()
            );
        }
    }

    if show(Section::Materials) {
        println!("\nMaterials");
        for item in state.search_materials(query) {
            println!("  #{} {} [{}, {}]", item.id, item.title, item.kind, item.size);
            if let Some(url) = &item.file_url {
                println!("      {}", short_reference(url));
            }
        }
    }
}

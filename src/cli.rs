use std::path::PathBuf;

use cfdb_boundary::{NewCourse, NewFeedback, Request};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: cfdb.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite connection string, overrides the configuration
    #[arg(long, value_name = "DATABASE_URL", global = true)]
    pub db_url: Option<String>,

    /// Identity that is recorded as the creator of new records
    #[arg(long, value_name = "PRINCIPAL", global = true)]
    pub caller: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new course.
    AddCourse {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Repeat for multiple tags
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },
    /// List all courses.
    Courses,
    /// Show a single course.
    Course { id: String },
    /// Add feedback for a course.
    AddFeedback {
        #[arg(long)]
        course_id: String,
        #[arg(long, allow_negative_numbers = true)]
        rating: i32,
        #[arg(long)]
        message: String,
    },
    /// List all feedback of a course.
    FeedbackForCourse { course_id: String },
    /// Show a single feedback.
    Feedback { id: String },
    /// Upvote a feedback.
    Upvote { id: String },
    /// Downvote a feedback.
    Downvote { id: String },
    /// Execute a raw JSON request, e.g. '{"method":"getAllCourses"}'.
    Call { request: String },
    /// Create or update the database schema and exit.
    Migrate,
}

/// What the binary has to do for a command.
#[derive(Debug)]
pub enum Action {
    Request(Request),
    RawRequest(String),
    Migrate,
}

impl From<Command> for Action {
    fn from(from: Command) -> Self {
        let request = match from {
            Command::AddCourse {
                title,
                description,
                tags,
            } => Request::AddCourse(NewCourse {
                title,
                description,
                tags,
            }),
            Command::Courses => Request::GetAllCourses,
            Command::Course { id } => Request::GetCourse { course_id: id },
            Command::AddFeedback {
                course_id,
                rating,
                message,
            } => Request::AddFeedback(NewFeedback {
                course_id,
                rating,
                message,
            }),
            Command::FeedbackForCourse { course_id } => {
                Request::GetFeedbackForCourse { course_id }
            }
            Command::Feedback { id } => Request::GetFeedback { feedback_id: id },
            Command::Upvote { id } => Request::UpvoteFeedback { feedback_id: id },
            Command::Downvote { id } => Request::DownvoteFeedback { feedback_id: id },
            Command::Call { request } => return Self::RawRequest(request),
            Command::Migrate => return Self::Migrate,
        };
        Self::Request(request)
    }
}

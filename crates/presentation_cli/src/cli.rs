//! Command-line arguments

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use domain::{Course, FoodPreference, Gender, Route};

/// Alumni portal CLI
#[derive(Debug, Parser)]
#[command(name = "alumni-cli")]
#[command(author, version, about = "Alumni event portal client", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "ALUMNI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account; an OTP is mailed to the address
    Signup(SignupArgs),

    /// Confirm the OTP for the email used at sign-up
    VerifyOtp {
        /// The 4-digit code from the email
        code: String,
    },

    /// Sign in and store the access token
    Signin {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "ALUMNI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// Fill in the remaining profile details
    CompleteProfile(ProfileArgs),

    /// Show the signed-in user's profile
    Profile,

    /// List events, joined events and requested songs
    Dashboard,

    /// Register for an event
    Register {
        /// Event id as listed by `dashboard`
        event_id: String,
    },

    /// Request a song for the singing event
    AddSong {
        /// Song title and artist
        #[arg(short, long)]
        details: String,

        #[arg(short, long)]
        topic: Option<String>,

        /// Sing along to a karaoke track
        #[arg(long)]
        karaoke: bool,
    },

    /// Show admin statistics and tables
    Admin,

    /// Show where a page request would land
    Route {
        /// Page path, e.g. /dashboard
        path: Route,
    },

    /// Time left until an event starts
    Countdown {
        /// Start time, RFC 3339 (e.g. 2025-12-20T10:00:00Z)
        target: DateTime<Utc>,
    },
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(short, long)]
    pub email: String,

    #[arg(short, long, env = "ALUMNI_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(short, long)]
    pub name: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub course: Option<Course>,

    #[arg(long)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub graduation_year: Option<i32>,

    #[arg(long)]
    pub roll_number: Option<String>,

    #[arg(long)]
    pub designation: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub food_preference: Option<FoodPreference>,

    #[arg(long)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub course: Option<Course>,

    #[arg(long)]
    pub graduation_year: Option<i32>,

    #[arg(long)]
    pub roll_number: Option<String>,

    #[arg(long)]
    pub designation: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

impl SignupArgs {
    pub fn into_form(self) -> domain::SignupForm {
        let mut form = domain::SignupForm::new(self.email, self.password, self.name);
        form.phone_number = self.phone.unwrap_or_default();
        form.course = self.course;
        form.gender = self.gender;
        if self.graduation_year.is_some() {
            form.graduation_year = self.graduation_year;
        }
        form.roll_number = self.roll_number.unwrap_or_default();
        form.designation = self.designation.unwrap_or_default();
        form.address = self.address.unwrap_or_default();
        form
    }
}

impl ProfileArgs {
    pub fn into_form(self) -> domain::ProfileForm {
        domain::ProfileForm {
            address: self.address,
            course: self.course,
            food_preference: self.food_preference,
            designation: self.designation,
            gender: self.gender,
            graduation_year: self.graduation_year,
            roll_number: self.roll_number,
            phone_number: self.phone,
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vetech_core::models::{
    ActivityLevel, AppointmentPriority, DietObjective, FeedingType, GoalKind, GoalPeriod,
    GoalStatus, RankingPeriod, RedemptionStatus, StatisticsPeriod,
};

#[derive(Parser)]
#[command(name = "vetech")]
#[command(about = "Manage your pets, consultations and rewards at a VeTech clinic")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name (account + backend settings)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Backend base URL for this invocation only
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign out and inspect the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Manage your pets
    Pets {
        #[command(subcommand)]
        command: PetCommands,
    },
    /// Book and manage consultations
    #[command(alias = "appointments")]
    Consultations {
        #[command(subcommand)]
        command: ConsultationCommands,
    },
    /// Appointment requests awaiting clinic approval
    Requests {
        #[command(subcommand)]
        command: RequestCommands,
    },
    /// Diet plans and daily feeding progress
    Diets {
        #[command(subcommand)]
        command: DietCommands,
    },
    /// Goals, points and rewards
    Rewards {
        #[command(subcommand)]
        command: RewardCommands,
    },
    /// Your client profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Health history for a pet
    History {
        /// Pet ID
        pet: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in and store the session in the OS keychain
    Login {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show whether the profile is signed in
    Status {
        /// Also ask the backend whether the token is still valid
        #[arg(long)]
        check: bool,
    },
    /// Show the identity encoded in the stored token
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PetCommands {
    /// List your pets
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one pet
    Show {
        /// Pet ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a new pet
    Add {
        #[arg(long)]
        name: String,
        /// e.g. "Cachorro", "Gato"
        #[arg(long)]
        species: String,
        #[arg(long)]
        breed: Option<String>,
        /// Age in years
        #[arg(long)]
        age: Option<u32>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long, value_name = "TEXT")]
        medical_history: Option<String>,
    },
    /// Update pet details
    Update {
        /// Pet ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        breed: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long, value_name = "TEXT")]
        medical_history: Option<String>,
    },
    /// Remove a pet
    #[command(alias = "delete")]
    Remove {
        /// Pet ID
        id: String,
    },
    /// Record a new weight
    Weight {
        /// Pet ID
        id: String,
        /// Weight in kg
        kg: f64,
    },
}

#[derive(Subcommand)]
pub enum ConsultationCommands {
    /// List consultations with the next and last one highlighted
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Book a consultation
    Book {
        /// Pet ID
        #[arg(long)]
        pet: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
        /// Service type, e.g. "Consulta", "Vacina"
        #[arg(long, default_value = "Consulta")]
        service: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Cancel a consultation
    Cancel {
        /// Consultation ID
        id: String,
    },
    /// Show free time slots for a day
    Slots {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum RequestCommands {
    /// List your appointment requests
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask the clinic for an appointment
    Create {
        /// Pet ID
        #[arg(long)]
        pet: String,
        /// Service type
        #[arg(long)]
        service: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM or HH:MM:SS)
        #[arg(long)]
        start: String,
        /// End time (HH:MM or HH:MM:SS)
        #[arg(long)]
        end: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, value_enum, default_value_t = PriorityArg::Normal)]
        priority: PriorityArg,
    },
    /// Withdraw a request
    Cancel {
        /// Request ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum DietCommands {
    /// List diet plans
    List {
        /// Only diets for this pet ID
        #[arg(long)]
        pet: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a plan from the pet's weight and activity
    Generate {
        /// Pet ID
        #[arg(long)]
        pet: String,
        #[arg(long, value_enum, default_value_t = ActivityArg::Moderada)]
        activity: ActivityArg,
        #[arg(long, value_enum, default_value_t = ObjectiveArg::Manutencao)]
        objective: ObjectiveArg,
        #[arg(long, value_enum, default_value_t = FeedingArg::Racao)]
        feeding: FeedingArg,
        /// Weight in kg (defaults to the pet's recorded weight)
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Log a meal
    Progress {
        /// Meal index within the day
        #[arg(long)]
        meal: u32,
        /// Grams served
        #[arg(long)]
        grams: f64,
        /// Time served (HH:MM, defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show today's feeding progress
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum RewardCommands {
    /// List clinic goals
    Goals {
        #[arg(long, value_enum)]
        kind: Option<GoalKindArg>,
        #[arg(long, value_enum)]
        status: Option<GoalStatusArg>,
        #[arg(long, value_enum)]
        period: Option<GoalPeriodArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Points history for a pet
    Points {
        /// Pet ID
        pet: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Goal ID
        #[arg(long)]
        goal: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewards available in the catalogue
    List {
        /// Reward type
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        min_points: Option<i64>,
        #[arg(long)]
        max_points: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Redeem a reward for a pet
    Redeem {
        /// Pet ID
        pet: String,
        /// Reward ID
        reward: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Rewards already redeemed by a pet
    Redeemed {
        /// Pet ID
        pet: String,
        #[arg(long, value_enum)]
        status: Option<RedemptionArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Points statistics (every pet when no ID is given)
    Stats {
        /// Pet ID
        pet: Option<String>,
        #[arg(long, value_enum)]
        period: Option<StatsPeriodArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clinic points ranking
    Ranking {
        #[arg(long, value_enum)]
        period: Option<RankingPeriodArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update name and/or phone
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Backend base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved settings for the active profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Normal,
    High,
}

impl From<PriorityArg> for AppointmentPriority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Self::Low,
            PriorityArg::Normal => Self::Normal,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ActivityArg {
    Baixa,
    Moderada,
    Alta,
}

impl From<ActivityArg> for ActivityLevel {
    fn from(value: ActivityArg) -> Self {
        match value {
            ActivityArg::Baixa => Self::Low,
            ActivityArg::Moderada => Self::Moderate,
            ActivityArg::Alta => Self::High,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ObjectiveArg {
    Emagrecimento,
    GanhoPeso,
    Manutencao,
    Especial,
}

impl From<ObjectiveArg> for DietObjective {
    fn from(value: ObjectiveArg) -> Self {
        match value {
            ObjectiveArg::Emagrecimento => Self::WeightLoss,
            ObjectiveArg::GanhoPeso => Self::WeightGain,
            ObjectiveArg::Manutencao => Self::Maintenance,
            ObjectiveArg::Especial => Self::Special,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FeedingArg {
    Racao,
    Caseira,
    Mista,
}

impl From<FeedingArg> for FeedingType {
    fn from(value: FeedingArg) -> Self {
        match value {
            FeedingArg::Racao => Self::Kibble,
            FeedingArg::Caseira => Self::Homemade,
            FeedingArg::Mista => Self::Mixed,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum GoalKindArg {
    Atividade,
    Alimentacao,
    Peso,
    Consulta,
}

impl From<GoalKindArg> for GoalKind {
    fn from(value: GoalKindArg) -> Self {
        match value {
            GoalKindArg::Atividade => Self::Atividade,
            GoalKindArg::Alimentacao => Self::Alimentacao,
            GoalKindArg::Peso => Self::Peso,
            GoalKindArg::Consulta => Self::Consulta,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum GoalStatusArg {
    Ativa,
    Inativa,
}

impl From<GoalStatusArg> for GoalStatus {
    fn from(value: GoalStatusArg) -> Self {
        match value {
            GoalStatusArg::Ativa => Self::Ativa,
            GoalStatusArg::Inativa => Self::Inativa,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum GoalPeriodArg {
    Diario,
    Semanal,
    Mensal,
}

impl From<GoalPeriodArg> for GoalPeriod {
    fn from(value: GoalPeriodArg) -> Self {
        match value {
            GoalPeriodArg::Diario => Self::Diario,
            GoalPeriodArg::Semanal => Self::Semanal,
            GoalPeriodArg::Mensal => Self::Mensal,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RedemptionArg {
    Ativo,
    Usado,
    Expirado,
}

impl From<RedemptionArg> for RedemptionStatus {
    fn from(value: RedemptionArg) -> Self {
        match value {
            RedemptionArg::Ativo => Self::Ativo,
            RedemptionArg::Usado => Self::Usado,
            RedemptionArg::Expirado => Self::Expirado,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StatsPeriodArg {
    Semanal,
    Mensal,
    Trimestral,
}

impl From<StatsPeriodArg> for StatisticsPeriod {
    fn from(value: StatsPeriodArg) -> Self {
        match value {
            StatsPeriodArg::Semanal => Self::Weekly,
            StatsPeriodArg::Mensal => Self::Monthly,
            StatsPeriodArg::Trimestral => Self::Quarterly,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RankingPeriodArg {
    Semanal,
    Mensal,
    Anual,
}

impl From<RankingPeriodArg> for RankingPeriod {
    fn from(value: RankingPeriodArg) -> Self {
        match value {
            RankingPeriodArg::Semanal => Self::Weekly,
            RankingPeriodArg::Mensal => Self::Monthly,
            RankingPeriodArg::Anual => Self::Yearly,
        }
    }
}

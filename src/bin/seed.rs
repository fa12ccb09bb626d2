use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Parser;
use fake::{
    faker::{company::en::Buzzword, lorem::en::Sentence, name::en::Name},
    Fake,
};
use rand::{distributions::Alphanumeric, Rng};
use sqlx::sqlite::SqlitePoolOptions;

use clubboard::{
    auth::AuthService,
    domain::{
        ClubCategory, CreateClubRequest, CreateEventRequest, CreateNoticeRequest,
        CreateUserRequest, NoticeCategory, NoticeStatus, UserRole, ALL_CLUBS,
    },
    error::AppError,
    lifecycle::{DeadlineZone, LifecycleClock},
    repository::UserRepository,
    service::ServiceContext,
};

/// Creates the super-admin account and, optionally, demo postings.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    #[arg(long, default_value = "sqlite://clubboard.db?mode=rwc")]
    database_url: String,

    #[arg(long, default_value = "admin@clubboard.local")]
    email: String,

    /// Generated when omitted and printed once.
    #[arg(long)]
    password: Option<String>,

    #[arg(long, default_value = "Super Admin")]
    name: String,

    /// Also create sample clubs, events and notices.
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&args.database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let ctx = ServiceContext::sqlite(
        db_pool,
        Arc::new(AuthService::new("seed-only", 1)),
        LifecycleClock::system(DeadlineZone::Local),
    );

    let password = args.password.clone().unwrap_or_else(|| {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect()
    });

    let admin = match ctx.user_service.create_user(CreateUserRequest {
        name: args.name.clone(),
        email: args.email.clone(),
        password: password.clone(),
        role: Some(UserRole::SuperAdmin),
        club: Some(ALL_CLUBS.to_string()),
    }).await {
        Ok(user) => {
            println!("  ✅ Created super admin ({} / {})", user.email, password);
            user
        }
        Err(AppError::Conflict(_)) => {
            println!("  ℹ️  Super admin {} already exists, leaving it untouched", args.email);
            ctx.user_repo
                .find_by_email(&args.email)
                .await?
                .ok_or_else(|| anyhow::anyhow!("user {} vanished during seeding", args.email))?
        }
        Err(e) => return Err(e.into()),
    };

    if !args.demo {
        println!("🎉 Seeding complete");
        return Ok(());
    }

    println!("🏛️  Creating demo clubs...");
    let today = Utc::now();
    let demo_clubs = [
        ("Coding Club", ClubCategory::Coding, Some(today + Duration::days(5))),
        ("Robotics Society", ClubCategory::Robotics, Some(today)),
        ("Design Collective", ClubCategory::Design, Some(today - Duration::days(1))),
        ("Security Guild", ClubCategory::Cybersecurity, None),
    ];

    for (name, category, deadline) in demo_clubs {
        let request = CreateClubRequest {
            name: name.to_string(),
            description: Sentence(8..16).fake(),
            contact_email: format!("{}@clubboard.local", name.to_lowercase().replace(' ', ".")),
            logo: String::new(),
            category,
            role: Buzzword().fake(),
            is_recruiting: true,
            recruitment_deadline: deadline.map(|d| d.to_rfc3339()),
            requirements: Some(Sentence(4..8).fake()),
            application_form_link: String::new(),
            response_sheet_link: String::new(),
        };
        match ctx.club_service.create_club(&admin, request).await {
            Ok(club) => println!("  ✅ {}", club.name),
            Err(AppError::Conflict(_)) => println!("  ℹ️  {} already exists", name),
            Err(e) => return Err(e.into()),
        }

        let club_admin: String = Name().fake();
        match ctx.user_service.create_user(CreateUserRequest {
            name: club_admin,
            email: format!("lead.{}@clubboard.local", name.to_lowercase().replace(' ', "-")),
            password: "changeme".to_string(),
            role: Some(UserRole::ClubAdmin),
            club: Some(name.to_string()),
        }).await {
            Ok(lead) => println!("     lead account {} / changeme", lead.email),
            Err(AppError::Conflict(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    println!("📅 Creating demo events...");
    let event = CreateEventRequest {
        name: "Spring Hackathon".to_string(),
        problem_statement: Sentence(6..10).fake(),
        description: Sentence(10..20).fake(),
        club_name: "Coding Club".to_string(),
        event_date: (today + Duration::days(10)).to_rfc3339(),
        registration_deadline: Some((today + Duration::days(3)).to_rfc3339()),
        submission_deadline: Some((today + Duration::days(9)).to_rfc3339()),
        is_active: Some(true),
        prizes: Some("Trophies and swag".to_string()),
        rules: None,
        registration_form_link: String::new(),
        submission_form_link: String::new(),
        registration_response_link: String::new(),
        submission_response_link: String::new(),
    };
    let created = ctx.event_service.create_event(&admin, event).await?;
    println!("  ✅ {}", created.name);

    println!("📢 Creating demo notices...");
    for _ in 0..3 {
        let notice = CreateNoticeRequest {
            title: Sentence(3..6).fake(),
            content: Sentence(12..24).fake(),
            category: NoticeCategory::General,
            club_name: Some(ALL_CLUBS.to_string()),
            tags: vec!["demo".to_string()],
            is_active: Some(true),
            status: NoticeStatus::Live,
        };
        ctx.notice_service.create_notice(&admin, notice).await?;
    }

    println!("🎉 Seeding complete");
    Ok(())
}

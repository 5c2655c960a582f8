//! Development seed script: populates a fresh database with a demo company.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@acme.local";
const ADMIN_PASSWORD: &str = "Test123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = projectdesk::db::create_pool(&db_url, 5).await?;
    projectdesk::db::run_migrations(&pool).await?;

    println!("=== ProjectDesk Seed Script ===");

    let company_id = seed_company(&pool).await?;
    seed_users(&pool, company_id).await?;
    seed_projects(&pool, company_id).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: {ADMIN_EMAIL} / {ADMIN_PASSWORD}");

    Ok(())
}

async fn seed_company(pool: &PgPool) -> anyhow::Result<Uuid> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM companies WHERE name = 'Acme Studio'")
            .fetch_optional(pool)
            .await?;

    if let Some(id) = existing {
        println!("[skip] Company already exists ({id})");
        return Ok(id);
    }

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO companies (name, email) VALUES ('Acme Studio', 'hello@acme.local') RETURNING id",
    )
    .fetch_one(pool)
    .await?;

    println!("[done] Created company Acme Studio");
    Ok(id)
}

async fn seed_users(pool: &PgPool, company_id: Uuid) -> anyhow::Result<()> {
    let hash = projectdesk::services::auth::hash_password(ADMIN_PASSWORD)?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1))")
            .bind(ADMIN_EMAIL)
            .fetch_one(pool)
            .await?;

    if exists {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE lower(email) = lower($2)")
            .bind(&hash)
            .bind(ADMIN_EMAIL)
            .execute(pool)
            .await?;
        println!("[done] Updated admin password");
        return Ok(());
    }

    let now = Utc::now();
    // (name, email, role, salary, days since hire)
    let users = [
        ("Ada Admin", ADMIN_EMAIL, "admin", Some("0"), 400),
        ("Sam Senior", "sam@acme.local", "senior_employee", Some("5200"), 300),
        ("Lee Lead", "lee@acme.local", "senior_employee", Some("4800.50"), 120),
        ("Ari Assigned", "ari@acme.local", "assigned_employee", Some("3100"), 60),
        ("Kim Contractor", "kim@acme.local", "assigned_employee", None, 20),
    ];

    for (name, email, role, salary, days_ago) in users {
        sqlx::query(
            "INSERT INTO users (company_id, name, email, password_hash, role, salary, created_at)
             VALUES ($1, $2, $3, $4, $5::user_role, $6, $7)",
        )
        .bind(company_id)
        .bind(name)
        .bind(email)
        .bind(&hash)
        .bind(role)
        .bind(salary)
        .bind(now - Duration::days(days_ago))
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} users", users.len());
    Ok(())
}

async fn seed_projects(pool: &PgPool, company_id: Uuid) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE company_id = $1")
        .bind(company_id)
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Projects already exist ({count})");
        return Ok(());
    }

    let now = Utc::now();
    // (name, budget, extra_cost, status, days since start)
    let projects = [
        ("Brand refresh", Some(12000), 800, "completed", 330),
        ("Mobile app", Some(45000), 5200, "in-progress", 200),
        ("Partner portal", Some(18000), 0, "review", 140),
        ("Data migration", None, 1200, "hold", 95),
        ("Website launch", Some(9000), 300, "completed", 40),
        ("Support chatbot", Some(6000), 0, "to-do", 7),
    ];

    let employee_ids: Vec<Uuid> =
        sqlx::query_scalar("SELECT id FROM users WHERE company_id = $1 AND role <> 'admin'")
            .bind(company_id)
            .fetch_all(pool)
            .await?;

    for (i, (name, budget, extra_cost, status, days_ago)) in projects.into_iter().enumerate() {
        let start = now - Duration::days(days_ago);
        let project_id: Uuid = sqlx::query_scalar(
            "INSERT INTO projects (company_id, name, budget, extra_cost, status, start_date, end_date, created_at)
             VALUES ($1, $2, $3, $4, $5::project_status, $6, $7, $6)
             RETURNING id",
        )
        .bind(company_id)
        .bind(name)
        .bind(budget)
        .bind(extra_cost)
        .bind(status)
        .bind(start)
        .bind(start + Duration::days(90))
        .fetch_one(pool)
        .await?;

        for user_id in employee_ids.iter().skip(i % 2).step_by(2) {
            sqlx::query("INSERT INTO project_employees (project_id, user_id) VALUES ($1, $2)")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        }

        // (title, status, due in days from now; negative is past)
        let tasks = [
            ("Kickoff", "completed", -30),
            ("Design review", "review", -3),
            ("Implementation", "in-progress", 10),
            ("QA pass", "to-do", 25),
            ("Vendor sign-off", "hold", -1),
        ];
        for (title, task_status, due_in) in tasks {
            sqlx::query(
                "INSERT INTO tasks (project_id, title, status, end_date)
                 VALUES ($1, $2, $3::task_status, $4)",
            )
            .bind(project_id)
            .bind(title)
            .bind(task_status)
            .bind(now + Duration::days(due_in))
            .execute(pool)
            .await?;
        }
    }

    println!("[done] Created {} projects with tasks and assignments", projects.len());
    Ok(())
}

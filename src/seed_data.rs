//! Loads a small sample data set through the running API.
//!
//! Every record is created with a POST, so the server applies its usual
//! validation. Failures are logged and skipped; schedules are only created
//! when every client, employee and service they reference was created.

use chrono::{Duration, Local};
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use serde_json::{json, Value};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

struct Seeder {
    http: reqwest::Client,
    base_url: String,
}

impl Seeder {
    async fn check_health(&self) -> Result<()> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| eyre!("Cannot reach the server at {}: {}", self.base_url, e))?;

        if !response.status().is_success() {
            return Err(eyre!("Server is not healthy: {}", response.status()));
        }
        Ok(())
    }

    /// POSTs each payload in order and returns the records that were created.
    async fn create_all(&self, resource: &str, label: &str, payloads: Vec<Value>) -> Result<Vec<Value>> {
        let url = format!("{}/api/{}", self.base_url, resource);
        let mut created = Vec::with_capacity(payloads.len());

        for payload in payloads {
            let response = self.http.post(&url).json(&payload).send().await?;

            if response.status() == reqwest::StatusCode::CREATED {
                let record: Value = response.json().await?;
                info!("Created {} {}", resource, record[label]);
                created.push(record);
            } else {
                let status = response.status();
                let body = response.text().await?;
                warn!("Failed to create {} {}: {} {}", resource, payload[label], status, body);
            }
        }

        Ok(created)
    }
}

fn clients() -> Vec<Value> {
    vec![
        json!({
            "name": "Hotel Central Plaza",
            "email": "contacto@hotelcentral.com",
            "phone": "+1-555-0123",
            "address": "Calle Principal 123, Centro, Ciudad",
        }),
        json!({
            "name": "Oficinas Torre Empresarial",
            "email": "admin@torreempresarial.com",
            "phone": "+1-555-0234",
            "address": "Avenida Corporativa 456, Piso 12, Ciudad",
        }),
        json!({
            "name": "Centro Médico San Rafael",
            "email": "servicios@sanrafael.med",
            "phone": "+1-555-0345",
            "address": "Boulevard Salud 789, Zona Médica, Ciudad",
        }),
    ]
}

fn employees() -> Vec<Value> {
    vec![
        json!({
            "name": "María González",
            "email": "maria.gonzalez@limpiezas.com",
            "phone": "+1-555-1001",
            "position": "cleaner",
            "hourly_rate": 15.50,
        }),
        json!({
            "name": "Carlos Rodríguez",
            "email": "carlos.rodriguez@limpiezas.com",
            "phone": "+1-555-1002",
            "position": "cleaner",
            "hourly_rate": 16.00,
        }),
        json!({
            "name": "Ana López",
            "email": "ana.lopez@limpiezas.com",
            "phone": "+1-555-1003",
            "position": "supervisor",
            "hourly_rate": 22.00,
        }),
        json!({
            "name": "Pedro Martínez",
            "email": "pedro.martinez@limpiezas.com",
            "phone": "+1-555-1004",
            "position": "manager",
            "hourly_rate": 28.00,
        }),
    ]
}

fn services() -> Vec<Value> {
    vec![
        json!({
            "name": "Office cleaning",
            "description": "Floors, windows, restrooms and desks across the whole office",
            "base_price": 120.00,
            "estimated_duration": 180,
        }),
        json!({
            "name": "Hotel room deep clean",
            "description": "Bed linen change, bathroom clean and vacuuming",
            "base_price": 45.00,
            "estimated_duration": 60,
        }),
        json!({
            "name": "Medical area cleaning",
            "description": "Cleaning and disinfection with certified products",
            "base_price": 200.00,
            "estimated_duration": 240,
        }),
        json!({
            "name": "Common area upkeep",
            "description": "Lobbies, stairs, elevators and meeting rooms",
            "base_price": 80.00,
            "estimated_duration": 120,
        }),
        json!({
            "name": "Exterior windows",
            "description": "Exterior window washing for buildings up to three floors",
            "base_price": 150.00,
            "estimated_duration": 300,
        }),
    ]
}

/// Schedules starting a week from today, as (client, employee, service, day offset,
/// start, end, notes) indexes into the created records.
const SCHEDULE_PLAN: [(usize, usize, usize, i64, &str, &str, &str); 5] = [
    (0, 0, 1, 0, "08:00", "12:00", "Weekly room cleaning, third floor"),
    (1, 1, 0, 1, "18:00", "21:00", "Night office cleaning, floors 10-12"),
    (2, 2, 2, 2, "06:00", "10:00", "Operating rooms, supervision required"),
    (0, 0, 3, 3, "14:00", "16:00", "Weekly lobby and common areas"),
    (1, 3, 4, 5, "09:00", "14:00", "Monthly exterior windows, manager on site"),
];

fn schedules(clients: &[Value], employees: &[Value], services: &[Value]) -> Vec<Value> {
    let base_date = Local::now().date_naive() + Duration::days(7);

    SCHEDULE_PLAN
        .iter()
        .filter_map(|&(client, employee, service, offset, start, end, notes)| {
            let date = base_date + Duration::days(offset);
            Some(json!({
                "client_id": clients.get(client)?["id"],
                "employee_id": employees.get(employee)?["id"],
                "service_id": services.get(service)?["id"],
                "scheduled_date": format!("{}T00:00:00", date.format("%Y-%m-%d")),
                "start_time": start,
                "end_time": end,
                "notes": notes,
            }))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load environment variables
    dotenv().ok();

    let base_url = std::env::var("SEED_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let seeder = Seeder {
        http: reqwest::Client::new(),
        base_url: base_url.trim_end_matches('/').to_string(),
    };

    if let Err(e) = seeder.check_health().await {
        error!("{}", e);
        return Err(e);
    }
    info!("Server available at {}", seeder.base_url);

    let clients = seeder.create_all("clients", "name", clients()).await?;
    let employees = seeder.create_all("employees", "name", employees()).await?;
    let services = seeder.create_all("services", "name", services()).await?;

    let schedules = if clients.is_empty() || employees.is_empty() || services.is_empty() {
        warn!("Skipping schedules: clients, employees and services are all required");
        Vec::new()
    } else {
        let payloads = schedules(&clients, &employees, &services);
        seeder.create_all("schedules", "scheduled_date", payloads).await?
    };

    info!(
        "Sample data loaded: {} clients, {} employees, {} services, {} schedules",
        clients.len(),
        employees.len(),
        services.len(),
        schedules.len()
    );
    info!("Explore the data at {}", seeder.base_url);

    Ok(())
}

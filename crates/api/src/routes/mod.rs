pub mod health;
pub mod live_webinar;

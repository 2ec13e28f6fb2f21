use crate::db::get_connection;
use crate::error::Result;
use crate::rates;
use crate::settings::get_data_dir;

pub fn set(value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(crate::error::BalanzaError::Other(
            "rate must be positive".to_string(),
        ));
    }
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    rates::record_rate(&conn, value)?;
    println!("Recorded rate {value:.2}");
    Ok(())
}

pub fn show() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("balanza.db"))?;
    let rate = rates::latest_rate(&conn)?;
    println!("Rate: {:.2} (recorded {})", rate.value, rate.fetched_at);
    Ok(())
}

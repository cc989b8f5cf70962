//! Ticket CRUD service.

use uuid::Uuid;

use crate::db::FullRepository;
use crate::models::{
    validation, FlightId, LuggageType, Ticket, TravelClass, UserIdentification,
};

use super::error::{ServiceError, ServiceResult};

/// Input for creating or replacing a ticket.
///
/// Without a booking reference, one is generated. The referenced flight
/// must exist (the relational backend enforces this with a foreign key;
/// checking here keeps the in-memory backend honest too).
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub booking_reference: Option<String>,
    pub flight_id: FlightId,
    pub passenger_username: String,
    pub passenger_password: String,
    pub travel_class: TravelClass,
    pub luggage: LuggageType,
    pub price: f64,
}

/// Generate a fresh booking reference: 8 uppercase hex characters.
fn generate_booking_reference() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

pub async fn list_tickets(repo: &dyn FullRepository) -> ServiceResult<Vec<Ticket>> {
    Ok(repo.fetch_tickets().await?)
}

pub async fn get_ticket(
    repo: &dyn FullRepository,
    booking_reference: &str,
) -> ServiceResult<Ticket> {
    repo.fetch_ticket(booking_reference)
        .await?
        .ok_or_else(|| ServiceError::TicketNotFound(booking_reference.to_string()))
}

pub async fn create_ticket(
    repo: &dyn FullRepository,
    new_ticket: NewTicket,
) -> ServiceResult<Ticket> {
    let booking_reference = match new_ticket.booking_reference.clone() {
        Some(reference) => {
            validation::validate_non_blank("Booking reference", &reference)?;
            reference
        }
        None => generate_booking_reference(),
    };
    let ticket = build_ticket(repo, booking_reference, new_ticket).await?;
    Ok(repo.store_ticket(&ticket).await?)
}

/// Replace the ticket at `booking_reference`; the path key wins over any
/// body value.
pub async fn update_ticket(
    repo: &dyn FullRepository,
    booking_reference: &str,
    new_ticket: NewTicket,
) -> ServiceResult<Ticket> {
    validation::validate_non_blank("Booking reference", booking_reference)?;
    let ticket = build_ticket(repo, booking_reference.to_string(), new_ticket).await?;
    Ok(repo.store_ticket(&ticket).await?)
}

pub async fn delete_ticket(
    repo: &dyn FullRepository,
    booking_reference: &str,
) -> ServiceResult<()> {
    if repo.delete_ticket(booking_reference).await? {
        Ok(())
    } else {
        Err(ServiceError::TicketNotFound(booking_reference.to_string()))
    }
}

async fn build_ticket(
    repo: &dyn FullRepository,
    booking_reference: String,
    new_ticket: NewTicket,
) -> ServiceResult<Ticket> {
    let passenger = UserIdentification::new(
        new_ticket.passenger_username,
        new_ticket.passenger_password,
    )?;

    // Reject tickets pointing at flights that do not exist.
    super::flights::get_flight(repo, new_ticket.flight_id).await?;

    Ok(Ticket {
        booking_reference,
        flight_id: new_ticket.flight_id,
        passenger,
        travel_class: new_ticket.travel_class,
        luggage: new_ticket.luggage,
        price: new_ticket.price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_booking_reference_shape() {
        let reference = generate_booking_reference();
        assert_eq!(reference.len(), 8);
        assert!(reference.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generated_booking_references_are_unique() {
        let a = generate_booking_reference();
        let b = generate_booking_reference();
        assert_ne!(a, b);
    }
}

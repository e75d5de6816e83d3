use serde::{Deserialize, Serialize};

/// A stored customer record, keyed by `customer_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Customer {
    pub customer_id: String,
    pub email: String,
}

/// Request body for POST /v1/api/customer/add
///
/// Both fields are optional at the parsing layer so that a missing field is
/// reported with the service's own validation message instead of a serde error.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct AddCustomerRequest {
    pub customer_id: Option<String>,
    pub email: Option<String>,
}

impl AddCustomerRequest {
    /// Returns the record to store, or `None` if either field is absent or empty
    pub fn into_customer(self) -> Option<Customer> {
        match (self.customer_id, self.email) {
            (Some(customer_id), Some(email)) if !customer_id.is_empty() && !email.is_empty() => {
                Some(Customer { customer_id, email })
            }
            _ => None,
        }
    }
}

/// Response type for successful add operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddCustomerResponse {
    pub status: String,
}

impl AddCustomerResponse {
    pub fn added(customer_id: &str) -> Self {
        Self {
            status: format!("{} added successfully", customer_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_customer_with_both_fields() {
        let request = AddCustomerRequest {
            customer_id: Some("rajesham3".to_string()),
            email: Some("rajesham3@abc.com".to_string()),
        };

        assert_eq!(
            request.into_customer(),
            Some(Customer {
                customer_id: "rajesham3".to_string(),
                email: "rajesham3@abc.com".to_string(),
            })
        );
    }

    #[test]
    fn test_into_customer_rejects_missing_or_empty_fields() {
        let missing_id = AddCustomerRequest {
            customer_id: None,
            email: Some("missingid@example.com".to_string()),
        };
        let empty_email = AddCustomerRequest {
            customer_id: Some("abc".to_string()),
            email: Some(String::new()),
        };

        assert!(missing_id.into_customer().is_none());
        assert!(empty_email.into_customer().is_none());
        assert!(AddCustomerRequest::default().into_customer().is_none());
    }

    #[test]
    fn test_customer_serializes_to_flat_record() {
        let customer = Customer {
            customer_id: "rajesham3".to_string(),
            email: "rajesham3@abc.com".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            serde_json::json!({"customer_id": "rajesham3", "email": "rajesham3@abc.com"})
        );
    }

    #[test]
    fn test_added_status_message() {
        assert_eq!(AddCustomerResponse::added("rajesham3").status, "rajesham3 added successfully");
    }
}

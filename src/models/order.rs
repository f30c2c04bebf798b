// ============================================================================
// Structure : OrderRequest
// ============================================================================
// Demande d'achat ou de vente saisie dans le panneau Buy/Sell
//
// Aucun effet sur le solde : la demande est seulement journalisée
// puis affichée à l'utilisateur.
// ============================================================================

use chrono::{DateTime, Utc};

/// Sens de l'ordre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn label(&self) -> &'static str {
        match self {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        }
    }
}

/// Demande d'ordre horodatée
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub side: OrderSide,

    /// Quantité demandée (non validée)
    pub amount: f64,

    /// Crypto-monnaie visée (ex: "BTC")
    pub crypto_type: String,

    /// Adresse de destination (achat) ou d'origine (vente)
    pub wallet_address: String,

    pub requested_at: DateTime<Utc>,
}

impl OrderRequest {
    pub fn new(side: OrderSide, amount: f64, crypto_type: String, wallet_address: String) -> Self {
        Self {
            side,
            amount,
            crypto_type,
            wallet_address,
            requested_at: Utc::now(),
        }
    }

    /// Résumé lisible de la demande
    ///
    /// Format : "Buy 2 BTC to bc1q..." ou "Sell 2 BTC from bc1q..."
    pub fn summary(&self) -> String {
        let preposition = match self.side {
            OrderSide::Buy => "to",
            OrderSide::Sell => "from",
        };

        format!(
            "{} {} {} {} {}",
            self.side.label(),
            self.amount,
            self.crypto_type,
            preposition,
            self.wallet_address
        )
    }

    /// Résumé suivi de l'heure de la demande
    ///
    /// Format : "Buy 2 BTC to bc1q... (14:03:27 UTC)"
    pub fn receipt(&self) -> String {
        format!("{} ({} UTC)", self.summary(), self.requested_at.format("%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_buy() {
        let order = OrderRequest::new(OrderSide::Buy, 2.0, "BTC".to_string(), "addr1".to_string());
        assert_eq!(order.summary(), "Buy 2 BTC to addr1");
    }

    #[test]
    fn test_summary_sell() {
        let order = OrderRequest::new(OrderSide::Sell, 0.5, "ETH".to_string(), "addr2".to_string());
        assert_eq!(order.summary(), "Sell 0.5 ETH from addr2");
    }

    #[test]
    fn test_receipt_carries_request_time() {
        let before = Utc::now();
        let mut order =
            OrderRequest::new(OrderSide::Buy, 1.0, "BTC".to_string(), "addr".to_string());
        assert!(order.requested_at >= before && order.requested_at <= Utc::now());

        order.requested_at = DateTime::parse_from_rfc3339("2024-05-01T14:03:27Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(order.receipt(), "Buy 1 BTC to addr (14:03:27 UTC)");
    }
}

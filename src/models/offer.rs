// ============================================================================
// Carnet d'offres
// ============================================================================
// Registre en mémoire des offres créées depuis le panneau "Create Offer"
//
// CONCEPTS RUST :
// 1. BTreeMap : itération triée par identifiant
// 2. Compteur monotone : un id n'est jamais réutilisé, même après suppression
// 3. Result<_, OfferError> : NotFound au lieu d'un Option silencieux
// ============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::OfferError;

/// Une offre publiée
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub asset_url: String,

    /// Prix demandé, en unités entières
    pub price: u64,

    /// Nom de l'auteur ("Guest" si personne n'est connecté)
    pub creator: String,

    pub created_at: DateTime<Utc>,

    /// None tant que l'offre n'a jamais été modifiée
    pub updated_at: Option<DateTime<Utc>>,
}

impl Offer {
    /// Date de la dernière modification, ou de la création à défaut
    pub fn last_changed_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Champs saisis par l'utilisateur pour créer ou modifier une offre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferPayload {
    pub title: String,
    pub description: String,
    pub asset_url: String,
    pub price: u64,
}

impl OfferPayload {
    /// Construit un payload depuis les champs texte du formulaire
    ///
    /// Le titre est obligatoire et le prix doit être un entier positif ou nul.
    pub fn parse(
        title: &str,
        description: &str,
        asset_url: &str,
        price: &str,
    ) -> Result<Self, OfferError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(OfferError::Invalid {
                msg: "title is required".to_string(),
            });
        }

        let price = price.trim().parse::<u64>().map_err(|_| OfferError::Invalid {
            msg: format!("'{}' is not a valid price", price.trim()),
        })?;

        Ok(Self {
            title: title.to_string(),
            description: description.trim().to_string(),
            asset_url: asset_url.trim().to_string(),
            price,
        })
    }
}

/// Registre des offres
#[derive(Debug, Clone, Default)]
pub struct OfferBook {
    offers: BTreeMap<u64, Offer>,
    next_id: u64,
}

impl OfferBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publie une nouvelle offre et la renvoie
    pub fn add(&mut self, payload: OfferPayload, creator: &str) -> Offer {
        let id = self.next_id;
        self.next_id += 1;

        let offer = Offer {
            id,
            title: payload.title,
            description: payload.description,
            asset_url: payload.asset_url,
            price: payload.price,
            creator: creator.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        info!(id, title = %offer.title, price = offer.price, creator = %creator, "Offer added");
        self.offers.insert(id, offer.clone());
        offer
    }

    pub fn get(&self, id: u64) -> Result<&Offer, OfferError> {
        self.offers.get(&id).ok_or(OfferError::NotFound { id })
    }

    /// Remplace le contenu d'une offre existante
    pub fn update(&mut self, id: u64, payload: OfferPayload) -> Result<Offer, OfferError> {
        let Some(offer) = self.offers.get_mut(&id) else {
            warn!(id, "Update of unknown offer");
            return Err(OfferError::NotFound { id });
        };

        offer.title = payload.title;
        offer.description = payload.description;
        offer.asset_url = payload.asset_url;
        offer.price = payload.price;
        offer.updated_at = Some(Utc::now());

        info!(id, title = %offer.title, price = offer.price, "Offer updated");
        Ok(offer.clone())
    }

    pub fn remove(&mut self, id: u64) -> Result<Offer, OfferError> {
        match self.offers.remove(&id) {
            Some(offer) => {
                info!(id, title = %offer.title, "Offer removed");
                Ok(offer)
            }
            None => {
                warn!(id, "Removal of unknown offer");
                Err(OfferError::NotFound { id })
            }
        }
    }

    /// Offres triées par identifiant croissant
    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.offers.values()
    }

    /// Offre à la position `index` dans l'ordre d'itération
    pub fn nth(&self, index: usize) -> Option<&Offer> {
        self.offers.values().nth(index)
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

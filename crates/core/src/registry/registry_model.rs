//! Pool registry domain models.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::{Address, PoolId};
use crate::constants::curve;
use crate::errors::ConfigError;

/// Unit a pool's virtual price is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    #[default]
    Usd,
    /// Needs the BTC/USD reference spline on top of the virtual price
    Btc,
}

impl Denomination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Denomination::Usd => "usd",
            Denomination::Btc => "btc",
        }
    }

    /// Whether values in this unit must be scaled by a reference price.
    pub fn needs_reference(&self) -> bool {
        !matches!(self, Denomination::Usd)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Denomination {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usd" => Ok(Denomination::Usd),
            "btc" => Ok(Denomination::Btc),
            other => Err(ConfigError::UnknownDenomination(other.to_string())),
        }
    }
}

/// One tracked pool: the swap contract publishing virtual prices and the LP
/// token whose transfers are replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDefinition {
    pub swap: Address,
    pub token: PoolId,
    #[serde(default)]
    pub denomination: Denomination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PoolDefinition {
    /// Label for reports, falling back to the token address.
    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.token.to_string())
    }
}

/// Addresses excluded from balance accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BurnerSet(BTreeSet<Address>);

impl BurnerSet {
    pub fn new(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self(addresses.into_iter().collect())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains(address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }
}

/// On-disk registry layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub burners: Vec<Address>,
    pub pools: Vec<PoolDefinition>,
}

/// Tracked pools and burner addresses for a run.
///
/// Pool order is significant: it is the order in which pool contributions are
/// summed at every grid step.
#[derive(Debug, Clone)]
pub struct PoolRegistry {
    pools: Vec<PoolDefinition>,
    burners: BurnerSet,
    by_swap: HashMap<Address, usize>,
    by_token: HashMap<PoolId, usize>,
}

impl PoolRegistry {
    pub fn new(pools: Vec<PoolDefinition>, burners: BurnerSet) -> Result<Self, ConfigError> {
        let mut by_swap = HashMap::with_capacity(pools.len());
        let mut by_token = HashMap::with_capacity(pools.len());

        for (idx, pool) in pools.iter().enumerate() {
            if by_token.insert(pool.token, idx).is_some() {
                return Err(ConfigError::DuplicatePool(pool.token.to_string()));
            }
            if by_swap.insert(pool.swap, idx).is_some() {
                return Err(ConfigError::DuplicateSwap(pool.swap.to_string()));
            }
        }

        Ok(Self {
            pools,
            burners,
            by_swap,
            by_token,
        })
    }

    /// The Curve pools and burners the weighting was first computed for.
    pub fn curve_mainnet() -> Result<Self, ConfigError> {
        let burners = curve::BURNERS
            .iter()
            .map(|raw| raw.parse::<Address>())
            .collect::<Result<Vec<_>, _>>()?;

        let pools = curve::POOLS
            .iter()
            .map(|(swap, token, is_btc, label)| {
                Ok(PoolDefinition {
                    swap: swap.parse()?,
                    token: token.parse()?,
                    denomination: if *is_btc {
                        Denomination::Btc
                    } else {
                        Denomination::Usd
                    },
                    label: Some(label.to_string()),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Self::new(pools, BurnerSet::new(burners))
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let file: RegistryFile = serde_json::from_str(raw)?;
        Self::new(file.pools, BurnerSet::new(file.burners))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::RegistryIO {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let registry = Self::from_json_str(&raw)?;
        debug!(
            "Loaded registry from {}: {} pools, {} burners",
            path.display(),
            registry.pools.len(),
            registry.burners.len()
        );
        Ok(registry)
    }

    pub fn pools(&self) -> &[PoolDefinition] {
        &self.pools
    }

    pub fn burners(&self) -> &BurnerSet {
        &self.burners
    }

    pub fn is_burner(&self, address: &Address) -> bool {
        self.burners.contains(address)
    }

    pub fn pool(&self, token: &PoolId) -> Option<&PoolDefinition> {
        self.by_token.get(token).map(|idx| &self.pools[*idx])
    }

    pub fn pool_for_swap(&self, swap: &Address) -> Option<&PoolDefinition> {
        self.by_swap.get(swap).map(|idx| &self.pools[*idx])
    }

    pub fn is_tracked(&self, token: &PoolId) -> bool {
        self.by_token.contains_key(token)
    }

    /// Reference units required by at least one tracked pool.
    pub fn required_references(&self) -> BTreeSet<Denomination> {
        self.pools
            .iter()
            .map(|p| p.denomination)
            .filter(Denomination::needs_reference)
            .collect()
    }
}

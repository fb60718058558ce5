//! Template lookup by stable hash.
//!
//! [`SkillRegistry`] is a plain value usable on its own. A process-wide
//! instance can be installed once with [`initialize`] and torn down with
//! [`shutdown`]; it is immutable in between.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError, RwLock};

use super::hash::SkillHash;
use super::template::SkillTemplate;
use crate::error::{ErrorSeverity, GameError};

static GLOBAL: RwLock<Option<Arc<SkillRegistry>>> = RwLock::new(None);

/// Errors raised by template lookups and registry lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no skill template with hash {0}; the content catalog is incomplete")]
    MissingTemplate(SkillHash),

    #[error("no skill named `{0}`")]
    UnknownSkill(String),

    #[error("skill template `{name}` is defined more than once")]
    DuplicateTemplate { name: String },

    #[error("skill registry has not been initialized")]
    NotInitialized,

    #[error("skill registry is already initialized")]
    AlreadyInitialized,
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingTemplate(_) | Self::DuplicateTemplate { .. } => ErrorSeverity::Fatal,
            Self::UnknownSkill(_) => ErrorSeverity::Validation,
            Self::NotInitialized => ErrorSeverity::Recoverable,
            Self::AlreadyInitialized => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTemplate(_) => "REGISTRY_MISSING_TEMPLATE",
            Self::UnknownSkill(_) => "REGISTRY_UNKNOWN_SKILL",
            Self::DuplicateTemplate { .. } => "REGISTRY_DUPLICATE_TEMPLATE",
            Self::NotInitialized => "REGISTRY_NOT_INITIALIZED",
            Self::AlreadyInitialized => "REGISTRY_ALREADY_INITIALIZED",
        }
    }
}

/// Read-only map from [`SkillHash`] to [`SkillTemplate`].
#[derive(Clone, Debug, Default)]
pub struct SkillRegistry {
    templates: HashMap<SkillHash, SkillTemplate>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry, rejecting two templates with the same name.
    pub fn from_templates<I>(templates: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = SkillTemplate>,
    {
        let mut registry = Self::new();
        for template in templates {
            registry.insert(template)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, template: SkillTemplate) -> Result<(), RegistryError> {
        match self.templates.entry(template.hash()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateTemplate {
                name: template.name,
            }),
            Entry::Vacant(slot) => {
                slot.insert(template);
                Ok(())
            }
        }
    }

    pub fn get(&self, hash: SkillHash) -> Result<&SkillTemplate, RegistryError> {
        self.templates
            .get(&hash)
            .ok_or(RegistryError::MissingTemplate(hash))
    }

    pub fn by_name(&self, name: &str) -> Result<&SkillTemplate, RegistryError> {
        self.templates
            .get(&SkillHash::of(name))
            .ok_or_else(|| RegistryError::UnknownSkill(name.to_owned()))
    }

    pub fn contains(&self, hash: SkillHash) -> bool {
        self.templates.contains_key(&hash)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillTemplate> {
        self.templates.values()
    }
}

/// Installs the process-wide registry. Fails if one is already installed.
pub fn initialize(registry: SkillRegistry) -> Result<Arc<SkillRegistry>, RegistryError> {
    let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(RegistryError::AlreadyInitialized);
    }
    let registry = Arc::new(registry);
    *slot = Some(Arc::clone(&registry));
    Ok(registry)
}

/// Returns the process-wide registry.
pub fn global() -> Result<Arc<SkillRegistry>, RegistryError> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(RegistryError::NotInitialized)
}

/// Removes the process-wide registry. Outstanding handles stay valid.
pub fn shutdown() -> Option<Arc<SkillRegistry>> {
    GLOBAL.write().unwrap_or_else(PoisonError::into_inner).take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::curve::LinearInt;
    use crate::skill::template::SkillKind;

    fn strike() -> SkillTemplate {
        SkillTemplate::new(
            "strike",
            SkillKind::TargetDamage {
                damage: LinearInt::constant(10),
            },
        )
    }

    #[test]
    fn lookup_by_hash_and_name() {
        let registry = SkillRegistry::from_templates([strike()]).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(SkillHash::of("strike")).unwrap().name, "strike");
        assert_eq!(registry.by_name("strike").unwrap().name, "strike");
    }

    #[test]
    fn missing_template_is_fatal() {
        let registry = SkillRegistry::new();
        let err = registry.get(SkillHash::of("ghost")).unwrap_err();
        assert_eq!(err, RegistryError::MissingTemplate(SkillHash::of("ghost")));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);

        let err = registry.by_name("ghost").unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = SkillRegistry::from_templates([strike(), strike()]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateTemplate {
                name: "strike".into()
            }
        );
    }

    #[test]
    fn global_lifecycle() {
        shutdown();
        assert_eq!(global().unwrap_err(), RegistryError::NotInitialized);

        let installed = initialize(SkillRegistry::from_templates([strike()]).unwrap()).unwrap();
        assert_eq!(
            initialize(SkillRegistry::new()).unwrap_err(),
            RegistryError::AlreadyInitialized
        );
        assert!(Arc::ptr_eq(&installed, &global().unwrap()));

        assert!(shutdown().is_some());
        assert!(global().is_err());
        assert_eq!(installed.len(), 1);
    }
}

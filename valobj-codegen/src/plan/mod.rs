//! Augmentation planner.
//!
//! Computes the members and converter adapters to synthesize for an accepted
//! value object. Planning is deterministic: the same facts and configuration
//! always yield an identical plan, member order included.
//!
//! Member order is fixed: factory, try-factory, accessor, equality,
//! comparison, wrapper → underlying conversion, underlying → wrapper
//! conversion, formatting. Members the user already wrote are left out.

mod strategy;

use std::sync::Arc;

use valobj_core::{PrimitiveInfo, classify_type};
use valobj_ir::{
    AugmentationPlan, ComparisonGeneration, Configuration, ConversionDirection, ConversionStyle,
    ConverterAdapterSpec, ConverterTarget, DeclarationFacts, MemberRole, MemberSpec,
    PrimitiveCategory,
};

pub use strategy::{equality, ordering};

use crate::adapters::TemplateRegistry;

/// Plans augmentations using a set of converter templates.
#[derive(Clone, Default)]
pub struct Planner {
    templates: Arc<TemplateRegistry>,
}

impl Planner {
    pub fn new(templates: Arc<TemplateRegistry>) -> Self {
        Self { templates }
    }

    /// Plan the augmentation of an accepted declaration.
    ///
    /// Callers only invoke this after validation reported no blocking
    /// diagnostics; converter targets the registry does not know are skipped
    /// because validation already rejected them.
    pub fn plan(
        &self,
        facts: &DeclarationFacts,
        config: &Configuration,
        category: PrimitiveCategory,
    ) -> AugmentationPlan {
        let primitive = PrimitiveInfo {
            category,
            ..classify_type(&config.underlying)
        };
        let omitted = collisions(facts, config, primitive);

        let members = candidate_members(config, primitive)
            .into_iter()
            .filter(|member| !omitted.contains(&member.role()))
            .collect();

        let converters = self.adapters(config, category, &config.converters);

        AugmentationPlan {
            type_name: facts.type_name.clone(),
            qualified_name: facts.qualified_name.clone(),
            underlying: config.underlying.clone(),
            category,
            members,
            converters,
        }
    }

    /// Plan one adapter per target, in target order.
    ///
    /// Targets the registry does not know are skipped.
    pub fn adapters(
        &self,
        config: &Configuration,
        category: PrimitiveCategory,
        targets: &[ConverterTarget],
    ) -> Vec<ConverterAdapterSpec> {
        targets
            .iter()
            .filter_map(|target| self.templates.get(*target))
            .map(|template| template.adapter(config, category))
            .collect()
    }
}

/// Plan with the built-in converter templates.
pub fn plan(
    facts: &DeclarationFacts,
    config: &Configuration,
    category: PrimitiveCategory,
) -> AugmentationPlan {
    Planner::default().plan(facts, config, category)
}

/// Every member the planner would generate, before removing collisions.
fn candidate_members(config: &Configuration, primitive: PrimitiveInfo) -> Vec<MemberSpec> {
    let mut members = vec![
        MemberSpec::Factory {
            name: config.factory_name.clone(),
            validation: config.validation.clone(),
            normalization: config.normalize_input.clone(),
        },
        MemberSpec::TryFactory {
            name: config.try_factory_name(),
        },
        MemberSpec::Accessor {
            name: config.accessor_name.clone(),
            underlying: config.underlying.clone(),
        },
        MemberSpec::Equality {
            strategy: equality(primitive.category, config.text_comparison),
        },
    ];

    if config.comparison == ComparisonGeneration::UseUnderlying
        && let Some(strategy) = ordering(primitive, config)
    {
        members.push(MemberSpec::Comparison { strategy });
    }

    members.extend([
        MemberSpec::Conversion {
            direction: ConversionDirection::ToUnderlying,
            style: config.conversion,
            validates: false,
        },
        // Never implicit: an implicit conversion that can fail would surprise callers
        MemberSpec::Conversion {
            direction: ConversionDirection::FromUnderlying,
            style: ConversionStyle::Explicit,
            validates: true,
        },
        MemberSpec::Formatting,
    ]);

    members
}

/// Roles the planner would generate that the user already wrote by hand.
///
/// The member-collision rule reports exactly these roles and the planner
/// omits them, so both always agree.
pub fn collisions(
    facts: &DeclarationFacts,
    config: &Configuration,
    primitive: PrimitiveInfo,
) -> Vec<MemberRole> {
    let underlying = config.underlying.simple_name();
    let user_wrote = |role: MemberRole| match role {
        MemberRole::Equality => facts.user_members.equality,
        MemberRole::Comparison => facts.user_members.comparison,
        MemberRole::ConversionToUnderlying => facts.has_user_conversion(&facts.type_name, underlying),
        MemberRole::ConversionFromUnderlying => {
            facts.has_user_conversion(underlying, &facts.type_name)
        }
        MemberRole::Formatting => facts.user_members.formatting,
        MemberRole::Factory | MemberRole::TryFactory | MemberRole::Accessor => false,
    };

    candidate_members(config, primitive)
        .iter()
        .map(MemberSpec::role)
        .filter(|role| user_wrote(*role))
        .collect()
}

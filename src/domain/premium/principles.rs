//! The principles guiding which features are premium.

use serde::Serialize;

/// One guiding principle of the premium offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PremiumPrinciple {
    pub name: &'static str,
    pub description: &'static str,
}

const PRINCIPLES: [PremiumPrinciple; 4] = [
    PremiumPrinciple {
        name: "Spiritual First",
        description: "Core prayer experiences remain accessible to all users. Premium features enhance rather than restrict essential spiritual content.",
    },
    PremiumPrinciple {
        name: "Enhanced Experience",
        description: "Premium features offer deeper, richer prayer experiences through advanced visuals, audio guidance, and personalized content.",
    },
    PremiumPrinciple {
        name: "Family Connection",
        description: "Family features enable shared prayer experiences while respecting individual spiritual journeys.",
    },
    PremiumPrinciple {
        name: "Sustainable Development",
        description: "Premium subscriptions support ongoing development of high-quality prayer content and experiences.",
    },
];

/// The fixed list of premium principles, in presentation order.
pub fn premium_principles() -> &'static [PremiumPrinciple] {
    &PRINCIPLES
}

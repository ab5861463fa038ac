//! The agency's service catalog and the consultant persona built from it.

use serde::Serialize;

/// One productized service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Icon name the front end renders for this service.
    pub icon: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        id: "brand-core",
        title: "Brand Core®",
        description: "Direção Estratégica da Marca. Alinhamento contínuo do posicionamento, identidade e narrativa.",
        icon: "Target",
    },
    Service {
        id: "orange-identity",
        title: "Orange Identity®",
        description: "Padronização e Evolução da Identidade Visual. Manutenção e refinamento constante do design.",
        icon: "Palette",
    },
    Service {
        id: "creative-engine",
        title: "Creative Engine®",
        description: "Produção Criativa Mensal. Criação profissional de peças, campanhas e materiais digitais.",
        icon: "Cpu",
    },
    Service {
        id: "social-presence",
        title: "Social Presence®",
        description: "Presença Digital de Alto Padrão. Direção criativa com foco em consistência e estética.",
        icon: "ShareNetwork",
    },
    Service {
        id: "sales-kit",
        title: "SalesKit®",
        description: "Materiais Comerciais Premium. Apresentações, catálogos e propostas para o time comercial.",
        icon: "PresentationChart",
    },
    Service {
        id: "web-evolution",
        title: "Web Evolution®",
        description: "Evolução Contínua do Website. Ajustes, melhorias e implementação de novas seções.",
        icon: "Globe",
    },
    Service {
        id: "touch-points",
        title: "TouchPoints®",
        description: "Padronização de Pontos de Contato. WhatsApp, e-mail, documentos e processos.",
        icon: "Chats",
    },
    Service {
        id: "orange-automations",
        title: "Orange Automations®",
        description: "Fluxos de Atendimento e Eficiência. Criação de automações e integrações de CRM.",
        icon: "Robot",
    },
    Service {
        id: "brand-guard",
        title: "BrandGuard®",
        description: "Proteção e Monitoramento da Marca. Acompanhamento de risco no INPI e estratégia legal.",
        icon: "ShieldCheck",
    },
    Service {
        id: "monthly-review",
        title: "Monthly Review®",
        description: "Reunião Estratégica Mensal. Acompanhamento estruturado de métricas e prioridades.",
        icon: "ChartBar",
    },
    Service {
        id: "orange-support",
        title: "Orange Support®",
        description: "Suporte Criativo Prioritário. Atendimento rápido para demandas estratégicas.",
        icon: "Lightning",
    },
];

/// Look a service up by id.
pub fn find_service(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}

/// System prompt seeding every consultant conversation.
pub fn system_instruction() -> String {
    let services = SERVICES
        .iter()
        .map(|s| format!("- {}: {}", s.title, s.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Você é o Consultor Sênior de Estratégia da Tokyon.
A Tokyon é uma agência de branding e design focada no mercado corporativo de alto padrão (High-Ticket).
Seu tom de voz é: Profissional, Executivo, Estratégico, Confidencial e Sofisticado.
Você nunca usa gírias. Você fala com decisores (CEOs, CMOs).

Seu objetivo é explicar os serviços da Tokyon e recomendar o \"Orange Program\" (o programa completo) sempre que possível.

Nossos serviços são:
{services}

Se o usuário perguntar preços, diga que os valores são personalizados baseados na complexidade da operação e convide para uma reunião de diagnóstico.
Destaque que o \"Orange Program\" é a metodologia proprietária que unifica todos os {count} serviços para máxima eficiência e coerência de marca.",
        count = SERVICES.len()
    )
}

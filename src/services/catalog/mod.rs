//! 只读目录：Likert 量表与 COGA 认知无障碍分类

pub mod list;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::catalog::entities::{CogaCategory, LikertOption};

pub const LIKERT_OPTIONS: [LikertOption; 5] = [
    LikertOption {
        value: 1,
        label: "Discordo Totalmente",
    },
    LikertOption {
        value: 2,
        label: "Discordo",
    },
    LikertOption {
        value: 3,
        label: "Neutro",
    },
    LikertOption {
        value: 4,
        label: "Concordo",
    },
    LikertOption {
        value: 5,
        label: "Concordo Totalmente",
    },
];

pub const COGA_CATEGORIES: [CogaCategory; 16] = [
    CogaCategory {
        key: "MEMORIA",
        label: "Memória",
        description: "Relacionada à dificuldade de lembrar informações, instruções, etapas de processos ou retomar tarefas interrompidas.",
    },
    CogaCategory {
        key: "ATENCAO",
        label: "Atenção",
        description: "Envolve limitações na manutenção do foco, controle de distrações e processamento simultâneo de informações.",
    },
    CogaCategory {
        key: "FUNCAO_EXECUTIVA",
        label: "Função executiva",
        description: "Dificuldades em planejar, organizar, tomar decisões, resolver problemas e concluir tarefas com múltiplas etapas.",
    },
    CogaCategory {
        key: "LINGUAGEM",
        label: "Linguagem",
        description: "Relacionada à compreensão e produção de texto, especialmente quando há uso de linguagem complexa, ambígua ou técnica.",
    },
    CogaCategory {
        key: "ALFABETIZACAO",
        label: "Alfabetização (leitura e escrita)",
        description: "Dificuldades associadas à leitura de textos extensos, escrita e compreensão de estruturas textuais.",
    },
    CogaCategory {
        key: "CALCULO_RACIOCINIO",
        label: "Cálculo e raciocínio matemático",
        description: "Envolve limitações na compreensão de números, porcentagens, estatísticas e na realização de cálculos mentais.",
    },
    CogaCategory {
        key: "PROCESSAMENTO_SENSORIAL",
        label: "Processamento sensorial",
        description: "Dificuldades no processamento de estímulos visuais, sonoros ou táteis, especialmente em ambientes com excesso de estímulos.",
    },
    CogaCategory {
        key: "SAUDE_MENTAL_NEURODIVERGENCIA",
        label: "Saúde mental e neurodivergência",
        description: "Abrange condições como TDAH, autismo, dislexia, ansiedade e outras que podem impactar múltiplas funções cognitivas.",
    },
    CogaCategory {
        key: "ENTENDER_COISAS_USO",
        label: "Ajudar usuários a entender o que são as coisas e como usá-las",
        description: "Princípios para ajudar usuários a compreender o propósito de interfaces e como interagir com elementos.",
    },
    CogaCategory {
        key: "ENCONTRAR_CONTEUDO",
        label: "Ajudar usuários a encontrar o que precisam",
        description: "Diretrizes para facilitar a localização e acesso a conteúdos e funcionalidades importantes.",
    },
    CogaCategory {
        key: "CONTEUDO_COMPREENSIVEL",
        label: "Usar conteúdo nítido e compreensível",
        description: "Recomendações para apresentar informações de forma clara, organizada e fácil de entender.",
    },
    CogaCategory {
        key: "EVITAR_ERROS",
        label: "Ajudar usuários a evitar erros e saber como corrigi-los",
        description: "Estratégias para prevenir erros e fornecer suporte para correção quando ocorrem.",
    },
    CogaCategory {
        key: "MANTER_FOCO",
        label: "Ajudar usuários a se concentrarem",
        description: "Técnicas para reduzir distrações e ajudar usuários a manterem o foco em tarefas.",
    },
    CogaCategory {
        key: "PROCESSOS_SEM_MEMORIA",
        label: "Garantir que processos não dependam da memória",
        description: "Design de processos que não exigem que usuários lembrem informações entre etapas.",
    },
    CogaCategory {
        key: "AJUDA_SUPORTE",
        label: "Fornecer ajuda e suporte",
        description: "Recursos de ajuda acessíveis e suporte contextual para usuários quando necessário.",
    },
    CogaCategory {
        key: "ADAPTACAO_PERSONALIZACAO",
        label: "Permitir adaptação e personalização",
        description: "Capacidades para adaptar interfaces e conteúdos às necessidades individuais dos usuários.",
    },
];

/// 按键查找分类
pub fn find_category(key: &str) -> Option<&'static CogaCategory> {
    COGA_CATEGORIES.iter().find(|c| c.key == key)
}

pub struct CatalogService;

impl CatalogService {
    pub fn new_lazy() -> Self {
        Self
    }

    // Likert 量表选项
    pub async fn list_likert_options(&self) -> ActixResult<HttpResponse> {
        list::list_likert_options().await
    }

    // COGA 分类
    pub async fn list_categories(&self) -> ActixResult<HttpResponse> {
        list::list_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_category() {
        assert_eq!(find_category("MEMORIA").map(|c| c.label), Some("Memória"));
        assert!(find_category("UNKNOWN").is_none());
    }

    #[test]
    fn test_catalog_keys_are_unique() {
        let mut keys: Vec<_> = COGA_CATEGORIES.iter().map(|c| c.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), COGA_CATEGORIES.len());
        assert_eq!(LIKERT_OPTIONS.len(), 5);
    }
}

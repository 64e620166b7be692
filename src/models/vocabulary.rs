//! 分类取值的静态对照表
//!
//! 所有表的键都是小写、去首尾空白后的原始值。

use phf::phf_map;

/// 未命中对照表时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// 保留原值
    Passthrough,
    /// 替换为固定哨兵值
    Sentinel(&'static str),
}

/// 未知分类的哨兵值
pub const UNKNOWN: &str = "Unknown";

/// 一张取值对照表
#[derive(Debug)]
pub struct Vocabulary {
    pub name: &'static str,
    pub table: &'static phf::Map<&'static str, &'static str>,
    /// 规范取值集合，已是规范值的输入原样保留
    pub canonical: &'static [&'static str],
    pub fallback: Fallback,
}

impl Vocabulary {
    /// 把单个取值映射到规范取值
    ///
    /// 映射缺失不是错误：按 `fallback` 保留原值或返回哨兵值。
    pub fn canonicalize(&self, value: Option<&str>) -> Option<String> {
        let value = match value {
            Some(v) => v,
            None => {
                return match self.fallback {
                    Fallback::Sentinel(sentinel) => Some(sentinel.to_string()),
                    Fallback::Passthrough => None,
                };
            }
        };

        if self.is_canonical(value) {
            return Some(value.to_string());
        }

        let key = value.trim().to_lowercase();
        if let Some(mapped) = self.table.get(key.as_str()) {
            return Some((*mapped).to_string());
        }

        match self.fallback {
            Fallback::Passthrough => Some(value.to_string()),
            Fallback::Sentinel(sentinel) => Some(sentinel.to_string()),
        }
    }

    fn is_canonical(&self, value: &str) -> bool {
        self.canonical.contains(&value)
            || matches!(self.fallback, Fallback::Sentinel(s) if s == value)
    }
}

// ========== 雇佣类型 ==========

static EMPLOYMENT_TYPE_TABLE: phf::Map<&'static str, &'static str> = phf_map! {
    "full-time" => "temps plein",
    "full_time" => "temps plein",
    "full time" => "temps plein",
    "part-time" => "temps partiel",
    "part_time" => "temps partiel",
    "part time" => "temps partiel",
    "temps complet" => "temps plein",
    "temps plein" => "temps plein",
    "temps partiel" => "temps partiel",
};

pub static EMPLOYMENT_TYPE: Vocabulary = Vocabulary {
    name: "employment_type",
    table: &EMPLOYMENT_TYPE_TABLE,
    canonical: &["temps plein", "temps partiel"],
    fallback: Fallback::Passthrough,
};

// ========== 合同期限 ==========

static CONTRACT_DURATION_TABLE: phf::Map<&'static str, &'static str> = phf_map! {
    "permanent" => "CDI",
    "contract" => "CDD",
    "temporary" => "temporaire",
    "cdi" => "CDI",
    "cdd" => "CDD",
    "contrat à durée indéterminée" => "CDI",
    "contrat à durée déterminée" => "CDD",
    "mis" => "temporaire",
    "intérim" => "temporaire",
    "interim" => "temporaire",
    "mission intérimaire" => "temporaire",
    "travail temporaire" => "temporaire",
};

pub static CONTRACT_DURATION: Vocabulary = Vocabulary {
    name: "contract_duration",
    table: &CONTRACT_DURATION_TABLE,
    canonical: &["CDI", "CDD", "temporaire"],
    fallback: Fallback::Passthrough,
};

// ========== 职位分类 ==========

/// 两个来源共享的规范分类
pub const CANONICAL_CATEGORIES: &[&str] = &[
    "Accounting & Finance Jobs",
    "Admin Jobs",
    "Charity & Voluntary Jobs",
    "Consultancy Jobs",
    "Creative & Design Jobs",
    "Customer Services Jobs",
    "Domestic help & Cleaning Jobs",
    "Energy, Oil & Gas Jobs",
    "Engineering Jobs",
    "Graduate Jobs",
    "HR & Recruitment Jobs",
    "Healthcare & Nursing Jobs",
    "Hospitality & Catering Jobs",
    "IT Jobs",
    "Legal Jobs",
    "Logistics & Warehouse Jobs",
    "Maintenance Jobs",
    "Manufacturing Jobs",
    "Other/General Jobs",
    "PR, Advertising & Marketing Jobs",
    "Part time Jobs",
    "Property Jobs",
    "Retail Jobs",
    "Sales Jobs",
    "Scientific & QA Jobs",
    "Social work Jobs",
    "Teaching Jobs",
    "Trade & Construction Jobs",
    "Travel Jobs",
];

/// Adzuna 分类标签
static ADZUNA_CATEGORY_TABLE: phf::Map<&'static str, &'static str> = phf_map! {
    "accounting-finance-jobs" => "Accounting & Finance Jobs",
    "admin-jobs" => "Admin Jobs",
    "charity-voluntary-jobs" => "Charity & Voluntary Jobs",
    "consultancy-jobs" => "Consultancy Jobs",
    "creative-design-jobs" => "Creative & Design Jobs",
    "customer-services-jobs" => "Customer Services Jobs",
    "domestic-help-cleaning-jobs" => "Domestic help & Cleaning Jobs",
    "energy-oil-gas-jobs" => "Energy, Oil & Gas Jobs",
    "engineering-jobs" => "Engineering Jobs",
    "graduate-jobs" => "Graduate Jobs",
    "hr-jobs" => "HR & Recruitment Jobs",
    "healthcare-nursing-jobs" => "Healthcare & Nursing Jobs",
    "hospitality-catering-jobs" => "Hospitality & Catering Jobs",
    "it-jobs" => "IT Jobs",
    "legal-jobs" => "Legal Jobs",
    "logistics-warehouse-jobs" => "Logistics & Warehouse Jobs",
    "maintenance-jobs" => "Maintenance Jobs",
    "manufacturing-jobs" => "Manufacturing Jobs",
    "other-general-jobs" => "Other/General Jobs",
    "pr-advertising-marketing-jobs" => "PR, Advertising & Marketing Jobs",
    "part-time-jobs" => "Part time Jobs",
    "property-jobs" => "Property Jobs",
    "retail-jobs" => "Retail Jobs",
    "sales-jobs" => "Sales Jobs",
    "scientific-qa-jobs" => "Scientific & QA Jobs",
    "social-work-jobs" => "Social work Jobs",
    "teaching-jobs" => "Teaching Jobs",
    "trade-construction-jobs" => "Trade & Construction Jobs",
    "travel-jobs" => "Travel Jobs",
};

pub static ADZUNA_CATEGORY: Vocabulary = Vocabulary {
    name: "adzuna_category",
    table: &ADZUNA_CATEGORY_TABLE,
    canonical: CANONICAL_CATEGORIES,
    fallback: Fallback::Sentinel(UNKNOWN),
};

/// France Travail 行业（详情页 `industry` 微数据）
static FRANCETRAVAIL_SECTOR_TABLE: phf::Map<&'static str, &'static str> = phf_map! {
    "programmation informatique" => "IT Jobs",
    "conseil en systèmes et logiciels informatiques" => "IT Jobs",
    "programmation, conseil et autres activités informatiques" => "IT Jobs",
    "autres activités informatiques" => "IT Jobs",
    "édition de logiciels applicatifs" => "IT Jobs",
    "activités comptables" => "Accounting & Finance Jobs",
    "autres intermédiations monétaires" => "Accounting & Finance Jobs",
    "activités des agences de travail temporaire" => "HR & Recruitment Jobs",
    "activités des agences de placement de main-d'oeuvre" => "HR & Recruitment Jobs",
    "restauration traditionnelle" => "Hospitality & Catering Jobs",
    "restauration de type rapide" => "Hospitality & Catering Jobs",
    "hôtels et hébergement similaire" => "Hospitality & Catering Jobs",
    "activités hospitalières" => "Healthcare & Nursing Jobs",
    "hébergement médicalisé pour personnes âgées" => "Healthcare & Nursing Jobs",
    "aide à domicile" => "Social work Jobs",
    "action sociale sans hébergement n.c.a." => "Social work Jobs",
    "enseignement secondaire général" => "Teaching Jobs",
    "enseignement supérieur" => "Teaching Jobs",
    "travaux de maçonnerie générale et gros oeuvre de bâtiment" => "Trade & Construction Jobs",
    "travaux d'installation électrique dans tous locaux" => "Trade & Construction Jobs",
    "transports routiers de fret interurbains" => "Logistics & Warehouse Jobs",
    "entreposage et stockage non frigorifique" => "Logistics & Warehouse Jobs",
    "ingénierie, études techniques" => "Engineering Jobs",
    "activités juridiques" => "Legal Jobs",
    "nettoyage courant des bâtiments" => "Domestic help & Cleaning Jobs",
    "activités des marchands de biens immobiliers" => "Property Jobs",
    "agences immobilières" => "Property Jobs",
    "supermarchés" => "Retail Jobs",
    "hypermarchés" => "Retail Jobs",
    "commerce de détail d'habillement en magasin spécialisé" => "Retail Jobs",
    "activités des agences de publicité" => "PR, Advertising & Marketing Jobs",
    "conseil pour les affaires et autres conseils de gestion" => "Consultancy Jobs",
};

pub static FRANCETRAVAIL_CATEGORY: Vocabulary = Vocabulary {
    name: "francetravail_category",
    table: &FRANCETRAVAIL_SECTOR_TABLE,
    canonical: CANONICAL_CATEGORIES,
    fallback: Fallback::Passthrough,
};

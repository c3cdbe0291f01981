//! Static KPI catalog: keys, report order, labels, units and suggestion texts.

use serde::Serialize;

/// Environmental KPIs in windowed-report order.
pub const ENV_REPORT_KPIS: &[&str] = &[
    "temperature",
    "humidity",
    "energy_specific",
    "water_specific",
    "vibration_g",
    "light",
    "co2eq_ratio",
];

/// Environmental KPIs shown in the live snapshot.
pub const ENV_SNAPSHOT_KPIS: &[&str] = &[
    "temperature",
    "humidity",
    "light",
    "distance_mm",
    "vibration_g",
    "co2_ppm",
];

/// Environmental KPIs eligible for the DSS (those with thresholds by default).
pub const ENV_DSS_KPIS: &[&str] = &[
    "temperature",
    "humidity",
    "light",
    "vibration_g",
    "co2_ppm",
    "distance_mm",
];

/// Social KPIs in report order.
pub const SOCIAL_KPIS: &[&str] = &[
    "turnover_pct",
    "training_hours_per_employee_y",
    "satisfaction_index",
    "absenteeism_pct",
    "gender_female_pct",
    "accidents_per_1000h",
    "salary_vs_benchmark_pct",
    "ethical_suppliers_pct",
    "overtime_hours_per_employee_m",
    "community_projects_count",
];

/// Key of the calibrated CO2 KPI.
pub const CO2_KPI: &str = "co2_ppm";

/// Fields a user must provide for a social KPI record.
pub const SOCIAL_REQUIRED_FIELDS: &[&str] = &[
    "facility",
    "period_start",
    "period_end",
    "turnover_pct",
    "training_hours_per_employee_y",
    "satisfaction_index",
    "satisfaction_scale",
    "absenteeism_pct",
    "gender_female_pct",
    "accidents_per_1000h",
    "salary_vs_benchmark_pct",
    "ethical_suppliers_pct",
    "overtime_hours_per_employee_m",
    "community_projects_count",
];

/// A report recommendation, keyed the way report consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub azione: String,
    pub impatto_stimato: String,
    pub nota: String,
}

impl Recommendation {
    fn from_static(text: &(&str, &str, &str)) -> Self {
        Self {
            azione: text.0.to_string(),
            impatto_stimato: text.1.to_string(),
            nota: text.2.to_string(),
        }
    }
}

/// Italian display label for a KPI key; unknown keys are echoed back.
pub fn label(key: &str) -> &str {
    match key {
        "temperature" => "Temperatura media ambiente",
        "humidity" => "Umidità relativa media",
        "light" => "Luminosità ambientale",
        "distance_mm" => "Distanza/posizionamento",
        "vibration_g" => "Livello vibrazioni macchine",
        "co2_ppm" => "CO₂ (ppm/idx)",
        "energy_specific" => "Consumo energetico specifico",
        "water_specific" => "Consumo idrico specifico",
        "co2eq_ratio" => "CO₂eq.ris./CO₂eq.tot",
        "turnover_pct" => "Tasso di turnover del personale",
        "training_hours_per_employee_y" => "Ore di formazione per dipendente",
        "satisfaction_index" => "Indice di soddisfazione dipendenti",
        "absenteeism_pct" => "Tasso di assenteismo",
        "gender_female_pct" => "Diversità di genere (% donne)",
        "accidents_per_1000h" => "Infortuni sul lavoro (per 1000 ore)",
        "salary_vs_benchmark_pct" => "Salario vs benchmark settore",
        "ethical_suppliers_pct" => "Fornitori certificati eticamente",
        "overtime_hours_per_employee_m" => "Ore straordinario per dipendente",
        "community_projects_count" => "Coinvolgimento comunità locale",
        other => other,
    }
}

/// Unit used when the target definition does not carry one.
pub fn default_unit(key: &str) -> &'static str {
    match key {
        "temperature" => "°C",
        "humidity" => "%",
        "light" => "lux",
        "distance_mm" => "mm",
        "vibration_g" => "g",
        "co2_ppm" => "ppm",
        "energy_specific" => "kWh/kg",
        "water_specific" => "L/kg",
        "co2eq_ratio" => "%",
        "turnover_pct" | "absenteeism_pct" | "gender_female_pct" => "%",
        "salary_vs_benchmark_pct" | "ethical_suppliers_pct" => "%",
        "training_hours_per_employee_y" => "h/anno",
        "overtime_hours_per_employee_m" => "h/mese",
        _ => "",
    }
}

// (azione, impatto_stimato, nota)
const SUGGESTIONS: &[(&str, (&str, &str, &str))] = &[
    (
        "temperature",
        (
            "Ricalibrare il setpoint HVAC e verificare l'isolamento dei reparti",
            "Riporta la temperatura nella fascia 24–30 °C riducendo i consumi di climatizzazione",
            "Intervento immediato",
        ),
    ),
    (
        "humidity",
        (
            "Regolare umidificatori e deumidificatori in filatura e tessitura",
            "Riduce rotture del filo di lino e difetti di tessitura",
            "Intervento immediato",
        ),
    ),
    (
        "light",
        (
            "Programmare manutenzione e sostituzione dei corpi illuminanti con LED dimmerabili",
            "Migliora comfort visivo e sicurezza con minori consumi elettrici",
            "Breve termine",
        ),
    ),
    (
        "distance_mm",
        (
            "Ricalibrare il posizionamento dei sensori e degli organi di guida",
            "Riporta il posizionamento entro tolleranza riducendo gli scarti",
            "Intervento immediato",
        ),
    ),
    (
        "vibration_g",
        (
            "Pianificare manutenzione predittiva su cuscinetti e bilanciamento dei telai",
            "Riduce fermi macchina e usura dei componenti",
            "Breve termine",
        ),
    ),
    (
        "co2_ppm",
        (
            "Aumentare i ricambi d'aria e verificare la ventilazione meccanica controllata",
            "Riporta la CO₂ sotto 700 ppm migliorando salubrità e concentrazione",
            "Intervento immediato",
        ),
    ),
    (
        "energy_specific",
        (
            "Avviare un audit energetico sulle linee a maggior assorbimento",
            "Riduce i kWh per kg di prodotto finito",
            "Medio termine",
        ),
    ),
    (
        "water_specific",
        (
            "Installare sistemi di recupero e ricircolo delle acque di processo",
            "Riduce i litri per kg nei processi di macerazione e finissaggio",
            "Medio termine",
        ),
    ),
    (
        "co2eq_ratio",
        (
            "Incrementare la quota di energia rinnovabile e le compensazioni certificate",
            "Aumenta il rapporto di CO₂eq ridotta sul totale",
            "Medio termine",
        ),
    ),
    (
        "turnover_pct",
        (
            "Rafforzare i percorsi di carriera e i colloqui di permanenza",
            "Riduce il turnover e i costi di selezione e inserimento",
            "Breve termine",
        ),
    ),
    (
        "training_hours_per_employee_y",
        (
            "Definire un piano formativo annuale con almeno 24 ore per dipendente",
            "Aumenta competenze tecniche e sicurezza operativa",
            "Breve termine",
        ),
    ),
    (
        "satisfaction_index",
        (
            "Condurre un'indagine di clima e attivare azioni di ascolto mirate",
            "Migliora l'engagement e riduce assenteismo e turnover",
            "Breve termine",
        ),
    ),
    (
        "absenteeism_pct",
        (
            "Analizzare le cause di assenza e introdurre misure di welfare e flessibilità",
            "Riduce le ore perse e i carichi sui colleghi",
            "Breve termine",
        ),
    ),
    (
        "gender_female_pct",
        (
            "Adottare politiche di selezione inclusive e obiettivi di equilibrio di genere",
            "Avvicina la quota femminile alla fascia 40–60%",
            "Medio termine",
        ),
    ),
    (
        "accidents_per_1000h",
        (
            "Rivedere la valutazione dei rischi e intensificare la formazione sulla sicurezza",
            "Riduce frequenza e gravità degli infortuni",
            "Intervento immediato",
        ),
    ),
    (
        "salary_vs_benchmark_pct",
        (
            "Effettuare un'analisi retributiva rispetto al benchmark di settore",
            "Allinea i salari al mercato migliorando attrattività e retention",
            "Medio termine",
        ),
    ),
    (
        "ethical_suppliers_pct",
        (
            "Estendere audit e certificazioni etiche ai fornitori strategici",
            "Aumenta la quota di fornitori certificati e riduce i rischi di filiera",
            "Medio termine",
        ),
    ),
    (
        "overtime_hours_per_employee_m",
        (
            "Ribilanciare turni e carichi di lavoro per ridurre lo straordinario",
            "Riduce affaticamento e rischio infortuni",
            "Breve termine",
        ),
    ),
    (
        "community_projects_count",
        (
            "Avviare almeno due progetti annuali con il territorio",
            "Rafforza il legame con la comunità locale",
            "Medio termine",
        ),
    ),
];

const GENERIC_FILLERS: &[(&str, &str, &str)] = &[
    (
        "Completare la raccolta dati dei KPI non disponibili",
        "Rende il punteggio rappresentativo di tutti gli indicatori",
        "Intervento immediato",
    ),
    (
        "Consolidare il monitoraggio periodico dei KPI con revisione mensile",
        "Permette di intercettare in anticipo gli scostamenti dai target",
        "Breve termine",
    ),
    (
        "Rivedere annualmente target e soglie con i responsabili di reparto",
        "Mantiene i target allineati agli obiettivi ESG aziendali",
        "Medio termine",
    ),
];

/// Static improvement suggestion for a KPI key.
pub fn suggestion(key: &str) -> Option<Recommendation> {
    SUGGESTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| Recommendation::from_static(text))
}

/// Generic recommendations used to pad a report to three entries.
pub fn generic_fillers() -> Vec<Recommendation> {
    GENERIC_FILLERS.iter().map(Recommendation::from_static).collect()
}

// src/services/pricing_service.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{CatalogItem, DealerConfig, DealerPricing, ItemType, PricedItem},
};

// Motor de preços do portal: resolve o preço de venda efetivo por
// concessionária, filtra compatibilidade por modelo e soma os totais do
// orçamento nas duas moedas.
#[derive(Clone)]
pub struct PricingService {
    catalog_repo: CatalogRepository,
}

impl PricingService {
    pub fn new(catalog_repo: CatalogRepository) -> Self {
        Self { catalog_repo }
    }

    /// Catálogo completo com a sobreposição de preços da concessionária
    /// aplicada. Sem `dealer_id`, todo item sai com o preço de custo.
    /// Com `selected_model`, motores e cores de casco já saem filtrados
    /// pela compatibilidade com o modelo.
    pub async fn dealer_config(
        &self,
        dealer_id: Option<Uuid>,
        selected_model: Option<&str>,
    ) -> Result<DealerConfig, AppError> {
        let boat_models = self.catalog_repo.list(ItemType::BoatModel).await?;
        let engine_packages = self.catalog_repo.list(ItemType::EnginePackage).await?;
        let hull_colors = self.catalog_repo.list(ItemType::HullColor).await?;
        let additional_options = self.catalog_repo.list(ItemType::AdditionalOption).await?;

        let overrides = match dealer_id {
            Some(id) => self.catalog_repo.pricing_for_dealer(id).await?,
            None => Vec::new(),
        };

        let mut engine_packages =
            apply_dealer_pricing(engine_packages, ItemType::EnginePackage, &overrides);
        let mut hull_colors = apply_dealer_pricing(hull_colors, ItemType::HullColor, &overrides);

        if let Some(model_name) = selected_model {
            engine_packages = compatible_engines(&engine_packages, model_name)
                .into_iter()
                .cloned()
                .collect();
            hull_colors = compatible_hull_colors(&hull_colors, model_name)
                .into_iter()
                .cloned()
                .collect();
        }

        Ok(DealerConfig {
            boat_models: apply_dealer_pricing(boat_models, ItemType::BoatModel, &overrides),
            engine_packages,
            hull_colors,
            additional_options: apply_dealer_pricing(
                additional_options,
                ItemType::AdditionalOption,
                &overrides,
            ),
        })
    }
}

/// Resolução de preços: com sobreposição da concessionária o preço de venda
/// substitui o de custo, campo a campo (uma moeda ausente cai no custo
/// daquela moeda). Sem sobreposição, venda = custo.
pub fn apply_dealer_pricing(
    items: Vec<CatalogItem>,
    item_type: ItemType,
    overrides: &[DealerPricing],
) -> Vec<PricedItem> {
    items
        .into_iter()
        .map(|item| {
            let configured = overrides
                .iter()
                .find(|p| p.item_type == item_type && p.item_id == item.id);

            match configured {
                Some(p) => PricedItem {
                    id: item.id,
                    name: item.name,
                    name_pt: item.name_pt,
                    usd: p.sale_price_usd.unwrap_or(item.usd),
                    brl: p.sale_price_brl.unwrap_or(item.brl),
                    cost_usd: item.usd,
                    cost_brl: item.brl,
                    compatible_models: item.compatible_models,
                    dealer_configured: true,
                    margin_percentage: p.margin_percentage.unwrap_or(Decimal::ZERO),
                },
                None => PricedItem {
                    id: item.id,
                    name: item.name,
                    name_pt: item.name_pt,
                    usd: item.usd,
                    brl: item.brl,
                    cost_usd: item.usd,
                    cost_brl: item.brl,
                    compatible_models: item.compatible_models,
                    dealer_configured: false,
                    margin_percentage: Decimal::ZERO,
                },
            }
        })
        .collect()
}

// Compatibilidade é assimétrica de propósito:
// - motor sem lista de modelos compatíveis NÃO serve para nenhum modelo;
// - cor de casco sem lista serve para TODOS os modelos.
pub fn engine_fits_model(engine: &PricedItem, model_name: &str) -> bool {
    engine
        .compatible_models
        .as_deref()
        .is_some_and(|models| models.iter().any(|m| m == model_name))
}

pub fn hull_fits_model(hull: &PricedItem, model_name: &str) -> bool {
    match hull.compatible_models.as_deref() {
        None => true,
        Some([]) => true,
        Some(models) => models.iter().any(|m| m == model_name),
    }
}

pub fn compatible_engines<'a>(
    engines: &'a [PricedItem],
    model_name: &str,
) -> Vec<&'a PricedItem> {
    engines
        .iter()
        .filter(|engine| engine_fits_model(engine, model_name))
        .collect()
}

pub fn compatible_hull_colors<'a>(
    hull_colors: &'a [PricedItem],
    model_name: &str,
) -> Vec<&'a PricedItem> {
    hull_colors
        .iter()
        .filter(|hull| hull_fits_model(hull, model_name))
        .collect()
}

pub fn find_by_name<'a>(items: &'a [PricedItem], name: &str) -> Option<&'a PricedItem> {
    items.iter().find(|item| item.name == name)
}

// Seleção em montagem de um barco. Trocar o modelo invalida os campos
// dependentes (motor e cor de casco).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoatSelection {
    pub boat_model: Option<String>,
    pub engine_package: Option<String>,
    pub hull_color: Option<String>,
    pub additional_options: Vec<String>,
}

impl BoatSelection {
    pub fn select_model(&mut self, model_name: impl Into<String>) {
        self.boat_model = Some(model_name.into());
        self.engine_package = None;
        self.hull_color = None;
    }

    pub fn select_engine(&mut self, engine_name: impl Into<String>) {
        self.engine_package = Some(engine_name.into());
    }

    pub fn select_hull_color(&mut self, color_name: impl Into<String>) {
        self.hull_color = Some(color_name.into());
    }

    /// Liga/desliga um opcional pelo nome.
    pub fn toggle_option(&mut self, option_name: &str) {
        if let Some(position) = self
            .additional_options
            .iter()
            .position(|name| name == option_name)
        {
            self.additional_options.remove(position);
        } else {
            self.additional_options.push(option_name.to_string());
        }
    }
}

// Par de valores por moeda. As moedas andam em paralelo; nunca há conversão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub usd: Decimal,
    pub brl: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalsBreakdown {
    pub base: CurrencyPair,
    pub engine: CurrencyPair,
    pub hull: CurrencyPair,
    pub options: CurrencyPair,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub total_usd: Decimal,
    pub total_brl: Decimal,
    pub breakdown: TotalsBreakdown,
}

/// total = base + motor + casco + Σ(opcionais), por moeda, de forma
/// independente.
pub fn calculate_totals(
    model: &PricedItem,
    engine: &PricedItem,
    hull: &PricedItem,
    options: &[&PricedItem],
) -> QuoteTotals {
    let options_usd: Decimal = options.iter().map(|opt| opt.usd).sum();
    let options_brl: Decimal = options.iter().map(|opt| opt.brl).sum();

    QuoteTotals {
        total_usd: model.usd + engine.usd + hull.usd + options_usd,
        total_brl: model.brl + engine.brl + hull.brl + options_brl,
        breakdown: TotalsBreakdown {
            base: CurrencyPair {
                usd: model.usd,
                brl: model.brl,
            },
            engine: CurrencyPair {
                usd: engine.usd,
                brl: engine.brl,
            },
            hull: CurrencyPair {
                usd: hull.usd,
                brl: hull.brl,
            },
            options: CurrencyPair {
                usd: options_usd,
                brl: options_brl,
            },
        },
    }
}

// Configuração validada de um barco: seleção normalizada + totais.
#[derive(Debug, Clone)]
pub struct ResolvedConfiguration {
    pub selection: BoatSelection,
    pub totals: QuoteTotals,
}

/// Resolve os nomes enviados pelo formulário contra o catálogo já precificado.
/// Item desconhecido é not-found; motor/casco fora da lista de
/// compatibilidade do modelo é erro de validação.
pub fn resolve_configuration(
    config: &DealerConfig,
    model_name: &str,
    engine_name: &str,
    hull_name: &str,
    option_names: &[String],
) -> Result<ResolvedConfiguration, AppError> {
    let mut selection = BoatSelection::default();
    selection.select_model(model_name);
    selection.select_engine(engine_name);
    selection.select_hull_color(hull_name);
    // Toggle reproduz o formulário: nome repetido desmarca o opcional.
    for name in option_names {
        selection.toggle_option(name);
    }

    let model = find_by_name(&config.boat_models, model_name)
        .ok_or_else(|| AppError::CatalogItemNotFound(model_name.to_string()))?;

    let engine = find_by_name(&config.engine_packages, engine_name)
        .ok_or_else(|| AppError::CatalogItemNotFound(engine_name.to_string()))?;
    if !engine_fits_model(engine, model_name) {
        return Err(AppError::IncompatibleSelection(engine_name.to_string()));
    }

    let hull = find_by_name(&config.hull_colors, hull_name)
        .ok_or_else(|| AppError::CatalogItemNotFound(hull_name.to_string()))?;
    if !hull_fits_model(hull, model_name) {
        return Err(AppError::IncompatibleSelection(hull_name.to_string()));
    }

    let mut options = Vec::with_capacity(selection.additional_options.len());
    for name in &selection.additional_options {
        let option = find_by_name(&config.additional_options, name)
            .ok_or_else(|| AppError::CatalogItemNotFound(name.clone()))?;
        options.push(option);
    }

    let totals = calculate_totals(model, engine, hull, &options);
    Ok(ResolvedConfiguration { selection, totals })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_item(id: i32, name: &str, usd: i64, brl: i64) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            name_pt: name.to_string(),
            usd: Decimal::from(usd),
            brl: Decimal::from(brl),
            compatible_models: None,
            created_at: None,
        }
    }

    fn priced(name: &str, usd: i64, brl: i64, compatible: Option<&[&str]>) -> PricedItem {
        PricedItem {
            id: 1,
            name: name.to_string(),
            name_pt: name.to_string(),
            usd: Decimal::from(usd),
            brl: Decimal::from(brl),
            cost_usd: Decimal::from(usd),
            cost_brl: Decimal::from(brl),
            compatible_models: compatible
                .map(|models| models.iter().map(|m| m.to_string()).collect()),
            dealer_configured: false,
            margin_percentage: Decimal::ZERO,
        }
    }

    fn pricing_override(
        item_type: ItemType,
        item_id: i32,
        usd: Option<i64>,
        brl: Option<i64>,
    ) -> DealerPricing {
        DealerPricing {
            id: 1,
            dealer_id: Uuid::new_v4(),
            item_type,
            item_id,
            sale_price_usd: usd.map(Decimal::from),
            sale_price_brl: brl.map(Decimal::from),
            margin_percentage: Some(Decimal::from(15)),
        }
    }

    #[test]
    fn override_replaces_cost_price_in_both_currencies() {
        let items = vec![catalog_item(1, "Mercury 300HP V8", 20_000, 104_000)];
        let overrides = vec![pricing_override(
            ItemType::EnginePackage,
            1,
            Some(25_000),
            Some(130_000),
        )];

        let priced = apply_dealer_pricing(items, ItemType::EnginePackage, &overrides);
        assert_eq!(priced[0].usd, Decimal::from(25_000));
        assert_eq!(priced[0].brl, Decimal::from(130_000));
        assert_eq!(priced[0].cost_usd, Decimal::from(20_000));
        assert_eq!(priced[0].cost_brl, Decimal::from(104_000));
        assert!(priced[0].dealer_configured);
        assert_eq!(priced[0].margin_percentage, Decimal::from(15));
    }

    #[test]
    fn partial_override_falls_back_per_field() {
        let items = vec![catalog_item(1, "Mercury 300HP V8", 20_000, 104_000)];
        let overrides = vec![pricing_override(ItemType::EnginePackage, 1, Some(25_000), None)];

        let priced = apply_dealer_pricing(items, ItemType::EnginePackage, &overrides);
        assert_eq!(priced[0].usd, Decimal::from(25_000));
        // BRL ausente na sobreposição cai no preço de custo
        assert_eq!(priced[0].brl, Decimal::from(104_000));
        assert!(priced[0].dealer_configured);
    }

    #[test]
    fn without_override_sale_price_equals_cost_price() {
        let items = vec![catalog_item(7, "V8 Engine", 20_000, 104_000)];
        let priced = apply_dealer_pricing(items, ItemType::EnginePackage, &[]);

        assert_eq!(priced[0].usd, priced[0].cost_usd);
        assert_eq!(priced[0].brl, priced[0].cost_brl);
        assert!(!priced[0].dealer_configured);
        assert_eq!(priced[0].margin_percentage, Decimal::ZERO);
    }

    #[test]
    fn override_for_another_item_type_is_ignored() {
        let items = vec![catalog_item(1, "Navy Blue", 5_000, 26_000)];
        let overrides = vec![pricing_override(
            ItemType::EnginePackage,
            1,
            Some(9_999),
            Some(9_999),
        )];

        let priced = apply_dealer_pricing(items, ItemType::HullColor, &overrides);
        assert!(!priced[0].dealer_configured);
        assert_eq!(priced[0].usd, Decimal::from(5_000));
    }

    #[test]
    fn engines_without_compatibility_list_are_excluded() {
        let engines = vec![
            priced("Mercury 300HP V8", 20_000, 104_000, Some(&["Drakkar 240 CC"])),
            priced("Yamaha 250HP", 18_000, 94_000, Some(&[])),
            priced("Suzuki 200HP", 15_000, 78_000, None),
        ];

        let compatible = compatible_engines(&engines, "Drakkar 240 CC");
        let names: Vec<&str> = compatible.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Mercury 300HP V8"]);
    }

    #[test]
    fn hull_colors_without_compatibility_list_are_universal() {
        let hulls = vec![
            priced("Navy Blue", 5_000, 26_000, Some(&["Drakkar 300 OB"])),
            priced("Arctic White", 0, 0, Some(&[])),
            priced("Storm Gray", 2_000, 10_400, None),
        ];

        let compatible = compatible_hull_colors(&hulls, "Drakkar 240 CC");
        let names: Vec<&str> = compatible.iter().map(|h| h.name.as_str()).collect();
        // Lista vazia ou ausente = compatível com todos os modelos
        assert_eq!(names, vec!["Arctic White", "Storm Gray"]);
    }

    #[test]
    fn selecting_a_new_model_clears_engine_and_hull() {
        let mut selection = BoatSelection::default();
        selection.select_model("Drakkar 240 CC");
        selection.select_engine("Mercury 300HP V8");
        selection.select_hull_color("Navy Blue");
        selection.toggle_option("Teak Flooring");

        selection.select_model("Drakkar 300 OB");

        assert_eq!(selection.boat_model.as_deref(), Some("Drakkar 300 OB"));
        assert_eq!(selection.engine_package, None);
        assert_eq!(selection.hull_color, None);
        // Opcionais não dependem do modelo
        assert_eq!(selection.additional_options, vec!["Teak Flooring"]);
    }

    #[test]
    fn toggle_option_adds_and_removes() {
        let mut selection = BoatSelection::default();
        selection.toggle_option("LED Package");
        assert_eq!(selection.additional_options, vec!["LED Package"]);
        selection.toggle_option("LED Package");
        assert!(selection.additional_options.is_empty());
    }

    fn sample_config() -> DealerConfig {
        DealerConfig {
            boat_models: vec![priced("Drakkar 240 CC", 100_000, 520_000, None)],
            engine_packages: vec![priced(
                "Mercury 300HP V8",
                20_000,
                104_000,
                Some(&["Drakkar 240 CC"]),
            )],
            hull_colors: vec![priced("Navy Blue", 5_000, 26_000, None)],
            additional_options: vec![
                priced("Teak Flooring", 1_000, 5_200, None),
                priced("LED Package", 1_000, 5_200, None),
            ],
        }
    }

    #[test]
    fn resolve_configuration_computes_totals_from_sale_prices() {
        let config = sample_config();
        let resolved = resolve_configuration(
            &config,
            "Drakkar 240 CC",
            "Mercury 300HP V8",
            "Navy Blue",
            &["Teak Flooring".to_string(), "LED Package".to_string()],
        )
        .unwrap();

        assert_eq!(resolved.totals.total_usd, Decimal::from(127_000));
        assert_eq!(
            resolved.selection.additional_options,
            vec!["Teak Flooring", "LED Package"]
        );
    }

    #[test]
    fn resolve_configuration_rejects_unknown_items() {
        let config = sample_config();
        let result = resolve_configuration(
            &config,
            "Drakkar 240 CC",
            "Volvo D6",
            "Navy Blue",
            &[],
        );
        assert!(matches!(result, Err(AppError::CatalogItemNotFound(name)) if name == "Volvo D6"));
    }

    #[test]
    fn resolve_configuration_rejects_incompatible_engine() {
        let mut config = sample_config();
        config.boat_models.push(priced("Drakkar 300 OB", 150_000, 780_000, None));

        let result = resolve_configuration(
            &config,
            "Drakkar 300 OB",
            "Mercury 300HP V8",
            "Navy Blue",
            &[],
        );
        assert!(
            matches!(result, Err(AppError::IncompatibleSelection(name)) if name == "Mercury 300HP V8")
        );
    }

    #[test]
    fn repeated_option_names_toggle_off() {
        let config = sample_config();
        let resolved = resolve_configuration(
            &config,
            "Drakkar 240 CC",
            "Mercury 300HP V8",
            "Navy Blue",
            &["Teak Flooring".to_string(), "Teak Flooring".to_string()],
        )
        .unwrap();

        assert!(resolved.selection.additional_options.is_empty());
        assert_eq!(resolved.totals.total_usd, Decimal::from(125_000));
    }

    #[test]
    fn totals_are_the_sum_of_the_four_components_per_currency() {
        let model = priced("Drakkar 240 CC", 100_000, 520_000, None);
        let engine = priced("Mercury 300HP V8", 20_000, 104_000, Some(&["Drakkar 240 CC"]));
        let hull = priced("Navy Blue", 5_000, 26_000, None);
        let opt_a = priced("Teak Flooring", 1_000, 5_200, None);
        let opt_b = priced("LED Package", 1_000, 5_200, None);

        let totals = calculate_totals(&model, &engine, &hull, &[&opt_a, &opt_b]);

        assert_eq!(totals.total_usd, Decimal::from(127_000));
        assert_eq!(totals.total_brl, Decimal::from(660_400));
        assert_eq!(totals.breakdown.base.usd, Decimal::from(100_000));
        assert_eq!(totals.breakdown.options.usd, Decimal::from(2_000));
        assert_eq!(totals.breakdown.options.brl, Decimal::from(10_400));
    }
}

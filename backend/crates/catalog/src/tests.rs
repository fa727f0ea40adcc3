//! Unit tests for Catalog crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use account::TeamRole;
    use kernel::id::{ProductId, SizeId, TeamId, UserId, VariantId};
    use kernel::pagination::{Page, PageParams, paginate};

    use crate::domain::entity::category::Category;
    use crate::domain::entity::image::Image;
    use crate::domain::entity::product::{
        Product, ProductDetail, ProductFilter, ProductSummary,
    };
    use crate::domain::entity::variant::{Size, Variant, VariantDetail};
    use crate::domain::repository::{
        CatalogTarget, CategoryRepository, ProductRepository, TeamAccess,
    };
    use crate::domain::value_object::product_sort::ProductSort;
    use crate::error::{CatalogError, CatalogResult};

    #[derive(Default)]
    pub struct State {
        pub teams: Vec<(TeamId, String)>,
        pub members: Vec<(TeamId, UserId, TeamRole)>,
        pub categories: Vec<Category>,
        pub products: Vec<Product>,
        pub variants: Vec<Variant>,
        pub sizes: Vec<Size>,
        pub images: Vec<Image>,
    }

    #[derive(Clone, Default)]
    pub struct MemoryCatalogRepository {
        pub state: Arc<Mutex<State>>,
    }

    impl MemoryCatalogRepository {
        pub fn add_team(&self, slug: &str) -> TeamId {
            let team_id = TeamId::new();
            self.state
                .lock()
                .unwrap()
                .teams
                .push((team_id, slug.to_string()));
            team_id
        }

        pub fn add_member(&self, team_id: TeamId, user_id: UserId, role: TeamRole) {
            self.state
                .lock()
                .unwrap()
                .members
                .push((team_id, user_id, role));
        }

        fn summary(state: &State, p: &Product) -> ProductSummary {
            let min_price = state
                .variants
                .iter()
                .filter(|v| v.product_id == p.product_id)
                .map(|v| v.effective_price(p.base_price).amount())
                .min()
                .unwrap_or(p.base_price.amount());
            let primary_image = state
                .images
                .iter()
                .filter(|i| i.product_id == p.product_id)
                .min_by_key(|i| i.position)
                .map(|i| i.url.clone());
            let category_slug = p.category_id.and_then(|c| {
                state
                    .categories
                    .iter()
                    .find(|cat| cat.category_id == c)
                    .map(|cat| cat.slug.clone())
            });
            ProductSummary {
                product_id: p.product_id,
                team_id: p.team_id,
                name: p.name.clone(),
                slug: p.slug.clone(),
                category_slug,
                min_price,
                primary_image,
                created_at: p.created_at,
            }
        }
    }

    impl ProductRepository for MemoryCatalogRepository {
        async fn list_products(
            &self,
            filter: &ProductFilter,
            params: &PageParams,
        ) -> CatalogResult<Page<ProductSummary>> {
            let state = self.state.lock().unwrap();
            let mut items: Vec<ProductSummary> = state
                .products
                .iter()
                .filter(|p| p.is_active)
                .filter(|p| {
                    filter.team.as_ref().is_none_or(|slug| {
                        state
                            .teams
                            .iter()
                            .any(|(id, s)| id == &p.team_id && s == slug)
                    })
                })
                .filter(|p| {
                    filter
                        .q
                        .as_ref()
                        .is_none_or(|q| p.name.to_lowercase().contains(&q.to_lowercase()))
                })
                .map(|p| Self::summary(&state, p))
                .filter(|s| {
                    filter
                        .category
                        .as_ref()
                        .is_none_or(|c| s.category_slug.as_ref() == Some(c))
                })
                .collect();

            match filter.sort {
                ProductSort::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
                ProductSort::PriceAsc => items.sort_by(|a, b| a.min_price.cmp(&b.min_price)),
                ProductSort::PriceDesc => items.sort_by(|a, b| b.min_price.cmp(&a.min_price)),
            }
            Ok(paginate(&items, params))
        }

        async fn find_detail_by_slug(&self, slug: &str) -> CatalogResult<Option<ProductDetail>> {
            let state = self.state.lock().unwrap();
            let Some(product) = state.products.iter().find(|p| p.slug == slug).cloned() else {
                return Ok(None);
            };
            let variants = state
                .variants
                .iter()
                .filter(|v| v.product_id == product.product_id)
                .map(|v| VariantDetail {
                    variant: v.clone(),
                    effective_price: v.effective_price(product.base_price).amount(),
                    sizes: state
                        .sizes
                        .iter()
                        .filter(|s| s.variant_id == v.variant_id)
                        .cloned()
                        .collect(),
                })
                .collect();
            let images = state
                .images
                .iter()
                .filter(|i| i.product_id == product.product_id)
                .cloned()
                .collect();
            let category = product.category_id.and_then(|c| {
                state
                    .categories
                    .iter()
                    .find(|cat| cat.category_id == c)
                    .cloned()
            });
            Ok(Some(ProductDetail {
                product,
                category,
                variants,
                images,
            }))
        }

        async fn find_product(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .products
                .iter()
                .find(|p| &p.product_id == product_id)
                .cloned())
        }

        async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.products.iter().any(|p| p.slug == product.slug) {
                return Err(CatalogError::SlugTaken);
            }
            if let Some(category_id) = product.category_id {
                if !state
                    .categories
                    .iter()
                    .any(|c| c.category_id == category_id)
                {
                    return Err(CatalogError::CategoryNotFound);
                }
            }
            state.products.push(product.clone());
            Ok(())
        }

        async fn update_product(&self, product: &Product) -> CatalogResult<bool> {
            let mut state = self.state.lock().unwrap();
            if state
                .products
                .iter()
                .any(|p| p.slug == product.slug && p.product_id != product.product_id)
            {
                return Err(CatalogError::SlugTaken);
            }
            match state
                .products
                .iter_mut()
                .find(|p| p.product_id == product.product_id)
            {
                Some(p) => {
                    *p = product.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn find_variant(&self, variant_id: &VariantId) -> CatalogResult<Option<Variant>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .variants
                .iter()
                .find(|v| &v.variant_id == variant_id)
                .cloned())
        }

        async fn insert_variant(&self, variant: &Variant) -> CatalogResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.variants.iter().any(|v| v.sku == variant.sku) {
                return Err(CatalogError::SkuTaken);
            }
            state.variants.push(variant.clone());
            Ok(())
        }

        async fn insert_size(&self, size: &Size) -> CatalogResult<()> {
            self.state.lock().unwrap().sizes.push(size.clone());
            Ok(())
        }

        async fn set_stock(&self, size_id: &SizeId, stock: i32) -> CatalogResult<Option<Size>> {
            let mut state = self.state.lock().unwrap();
            Ok(state
                .sizes
                .iter_mut()
                .find(|s| &s.size_id == size_id)
                .map(|s| {
                    s.stock = stock;
                    s.clone()
                }))
        }

        async fn count_images(&self, product_id: &ProductId) -> CatalogResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state
                .images
                .iter()
                .filter(|i| &i.product_id == product_id)
                .count() as i64)
        }

        async fn insert_image(&self, image: &Image) -> CatalogResult<()> {
            self.state.lock().unwrap().images.push(image.clone());
            Ok(())
        }

        async fn owning_team(&self, target: CatalogTarget) -> CatalogResult<Option<TeamId>> {
            let state = self.state.lock().unwrap();
            let product_id = match target {
                CatalogTarget::Product(id) => Some(id),
                CatalogTarget::Variant(id) => state
                    .variants
                    .iter()
                    .find(|v| v.variant_id == id)
                    .map(|v| v.product_id),
                CatalogTarget::Size(id) => state
                    .sizes
                    .iter()
                    .find(|s| s.size_id == id)
                    .and_then(|s| state.variants.iter().find(|v| v.variant_id == s.variant_id))
                    .map(|v| v.product_id),
            };
            Ok(product_id.and_then(|id| {
                state
                    .products
                    .iter()
                    .find(|p| p.product_id == id)
                    .map(|p| p.team_id)
            }))
        }
    }

    impl CategoryRepository for MemoryCatalogRepository {
        async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
            let mut categories = self.state.lock().unwrap().categories.clone();
            categories.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(categories)
        }

        async fn insert_category(&self, category: &Category) -> CatalogResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.categories.iter().any(|c| c.slug == category.slug) {
                return Err(CatalogError::SlugTaken);
            }
            state.categories.push(category.clone());
            Ok(())
        }
    }

    impl TeamAccess for MemoryCatalogRepository {
        async fn team_exists(&self, team_id: &TeamId) -> CatalogResult<bool> {
            let state = self.state.lock().unwrap();
            Ok(state.teams.iter().any(|(id, _)| id == team_id))
        }

        async fn team_role(
            &self,
            team_id: &TeamId,
            user_id: &UserId,
        ) -> CatalogResult<Option<TeamRole>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .members
                .iter()
                .find(|(t, u, _)| t == team_id && u == user_id)
                .map(|(_, _, r)| *r))
        }
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::CatalogConfig;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.max_images_per_product, 12);
        assert_eq!(
            CatalogConfig::development().max_images_per_product,
            config.max_images_per_product
        );
    }
}

#[cfg(test)]
mod models_tests {
    use crate::presentation::dto::*;
    use rust_decimal::Decimal;
    use validator::Validate;

    #[test]
    fn test_create_product_request_deserialization() {
        let json = format!(
            r#"{{
                "teamId": "{}",
                "name": "Batik Shirt",
                "slug": "batik-shirt",
                "basePrice": "150000.00"
            }}"#,
            kernel::id::TeamId::new()
        );
        let req: CreateProductRequest = serde_json::from_str(&json).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.base_price, Decimal::new(150_000, 0));
        assert!(req.category_id.is_none());
        assert_eq!(req.description, "");
    }

    #[test]
    fn test_slug_validation() {
        let req = CreateCategoryRequest {
            name: "Shirts".into(),
            slug: "Shirts!".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let req: StockRequest = serde_json::from_str(r#"{"stock":-1}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_zero_price() {
        let req = UpdateProductRequest {
            base_price: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(req.into_patch().is_err());
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ProductListQuery =
            serde_json::from_str(r#"{"sort":"price_desc","perPage":5}"#).unwrap();
        assert_eq!(query.page_params().per_page(), 5);
        assert_eq!(
            query.into_filter().sort,
            crate::domain::value_object::product_sort::ProductSort::PriceDesc
        );
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use account::TeamRole;
    use auth::{CurrentUser, UserRole};
    use kernel::id::{TeamId, UserId};
    use kernel::pagination::PageParams;
    use rust_decimal::Decimal;

    use super::support::*;
    use crate::application::*;
    use crate::domain::entity::product::{ProductFilter, ProductPatch};
    use crate::domain::value_object::product_sort::ProductSort;
    use crate::error::CatalogError;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            user_id: UserId::new(),
            role,
            expires_at: i64::MAX,
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn new_product(team_id: TeamId, slug: &str, price: &str) -> NewProduct {
        NewProduct {
            team_id,
            category_id: None,
            name: slug.replace('-', " "),
            slug: slug.to_string(),
            description: String::new(),
            base_price: dec(price),
        }
    }

    struct Fixture {
        repo: MemoryCatalogRepository,
        team: TeamId,
        owner: CurrentUser,
        manage: ManageCatalogUseCase<MemoryCatalogRepository>,
        browse: BrowseCatalogUseCase<MemoryCatalogRepository>,
    }

    fn fixture() -> Fixture {
        let repo = MemoryCatalogRepository::default();
        let team = repo.add_team("batik-co");
        let owner = user(UserRole::Customer);
        repo.add_member(team, owner.user_id, TeamRole::Owner);
        let shared = Arc::new(repo.clone());
        Fixture {
            manage: ManageCatalogUseCase::new(shared.clone(), Arc::new(CatalogConfig::development())),
            browse: BrowseCatalogUseCase::new(shared),
            repo,
            team,
            owner,
        }
    }

    #[tokio::test]
    async fn test_team_roles_gate_writes() {
        let f = fixture();
        let member = user(UserRole::Customer);
        f.repo.add_member(f.team, member.user_id, TeamRole::Member);
        let team_admin = user(UserRole::Customer);
        f.repo.add_member(f.team, team_admin.user_id, TeamRole::Admin);
        let outsider = user(UserRole::Customer);
        let global_admin = user(UserRole::Admin);

        assert!(matches!(
            f.manage
                .create_product(&member, new_product(f.team, "a", "10"))
                .await,
            Err(CatalogError::Forbidden)
        ));
        assert!(matches!(
            f.manage
                .create_product(&outsider, new_product(f.team, "b", "10"))
                .await,
            Err(CatalogError::Forbidden)
        ));
        assert!(
            f.manage
                .create_product(&team_admin, new_product(f.team, "c", "10"))
                .await
                .is_ok()
        );
        assert!(
            f.manage
                .create_product(&global_admin, new_product(f.team, "d", "10"))
                .await
                .is_ok()
        );
        assert!(matches!(
            f.manage
                .create_product(&global_admin, new_product(TeamId::new(), "e", "10"))
                .await,
            Err(CatalogError::TeamNotFound)
        ));
    }

    #[tokio::test]
    async fn test_price_and_slug_rules() {
        let f = fixture();
        assert!(matches!(
            f.manage
                .create_product(&f.owner, new_product(f.team, "free", "0"))
                .await,
            Err(CatalogError::Validation(_))
        ));

        f.manage
            .create_product(&f.owner, new_product(f.team, "shirt", "100"))
            .await
            .unwrap();
        assert!(matches!(
            f.manage
                .create_product(&f.owner, new_product(f.team, "shirt", "100"))
                .await,
            Err(CatalogError::SlugTaken)
        ));
    }

    #[tokio::test]
    async fn test_listing_min_price_and_sort() {
        let f = fixture();
        let cheap = f
            .manage
            .create_product(&f.owner, new_product(f.team, "cheap", "100"))
            .await
            .unwrap();
        let pricey = f
            .manage
            .create_product(&f.owner, new_product(f.team, "pricey", "300"))
            .await
            .unwrap();

        // A discounted variant drives the listed price below the base
        f.manage
            .add_variant(&f.owner, &pricey.product_id, "Sale".into(), "P-SALE".into(), Some(dec("50")))
            .await
            .unwrap();
        f.manage
            .add_variant(&f.owner, &cheap.product_id, "Plain".into(), "C-PLAIN".into(), None)
            .await
            .unwrap();

        let filter = ProductFilter {
            sort: ProductSort::PriceAsc,
            ..Default::default()
        };
        let page = f.browse.list(filter, &PageParams::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].slug, "pricey");
        assert_eq!(page.items[0].min_price, dec("50"));
        assert_eq!(page.items[1].min_price, dec("100"));

        let by_team = ProductFilter {
            team: Some(" BATIK-CO ".into()),
            q: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            f.browse.list(by_team, &PageParams::default()).await.unwrap().total,
            2
        );
    }

    #[tokio::test]
    async fn test_deactivated_product_is_hidden() {
        let f = fixture();
        let product = f
            .manage
            .create_product(&f.owner, new_product(f.team, "gone", "100"))
            .await
            .unwrap();
        assert!(f.browse.detail("gone").await.is_ok());

        f.manage
            .deactivate_product(&f.owner, &product.product_id)
            .await
            .unwrap();

        assert!(matches!(
            f.browse.detail("gone").await,
            Err(CatalogError::ProductNotFound)
        ));
        let page = f
            .browse
            .list(ProductFilter::default(), &PageParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);

        // Reactivation goes through a normal update
        f.manage
            .update_product(
                &f.owner,
                &product.product_id,
                ProductPatch {
                    is_active: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(f.browse.detail("gone").await.is_ok());
    }

    #[tokio::test]
    async fn test_sizes_stock_and_images() {
        let f = fixture();
        let product = f
            .manage
            .create_product(&f.owner, new_product(f.team, "kebaya", "250"))
            .await
            .unwrap();
        let variant = f
            .manage
            .add_variant(&f.owner, &product.product_id, "Red".into(), "kb-red".into(), None)
            .await
            .unwrap();
        let size = f
            .manage
            .add_size(&f.owner, &variant.variant_id, "M".into(), 4)
            .await
            .unwrap();

        assert!(matches!(
            f.manage.set_stock(&f.owner, &size.size_id, -2).await,
            Err(CatalogError::Validation(_))
        ));
        let updated = f.manage.set_stock(&f.owner, &size.size_id, 9).await.unwrap();
        assert_eq!(updated.stock, 9);

        let stranger = user(UserRole::Customer);
        assert!(matches!(
            f.manage.set_stock(&stranger, &size.size_id, 1).await,
            Err(CatalogError::Forbidden)
        ));

        // Images can only reference the product's own variants
        let other = f
            .manage
            .create_product(&f.owner, new_product(f.team, "other", "10"))
            .await
            .unwrap();
        let other_variant = f
            .manage
            .add_variant(&f.owner, &other.product_id, "X".into(), "OT-X".into(), None)
            .await
            .unwrap();
        assert!(matches!(
            f.manage
                .add_image(
                    &f.owner,
                    &product.product_id,
                    "https://cdn.example.com/k.jpg".into(),
                    Some(other_variant.variant_id),
                    0
                )
                .await,
            Err(CatalogError::VariantNotFound)
        ));
        f.manage
            .add_image(
                &f.owner,
                &product.product_id,
                "https://cdn.example.com/k.jpg".into(),
                Some(variant.variant_id),
                0,
            )
            .await
            .unwrap();

        let detail = f.browse.detail("kebaya").await.unwrap();
        assert_eq!(detail.variants.len(), 1);
        assert_eq!(detail.variants[0].sizes[0].stock, 9);
        assert_eq!(detail.variants[0].effective_price, dec("250"));
        assert_eq!(detail.images.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_sku() {
        let f = fixture();
        let product = f
            .manage
            .create_product(&f.owner, new_product(f.team, "sku", "10"))
            .await
            .unwrap();
        f.manage
            .add_variant(&f.owner, &product.product_id, "A".into(), "dup-1".into(), None)
            .await
            .unwrap();
        assert!(matches!(
            f.manage
                .add_variant(&f.owner, &product.product_id, "B".into(), "DUP-1".into(), None)
                .await,
            Err(CatalogError::SkuTaken)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::UserRole;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Extension, Router};
    use http_body_util::BodyExt;
    use kernel::id::UserId;
    use platform::jwt::{TokenConfig, TokenService};
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::config::CatalogConfig;
    use crate::presentation::router::catalog_router_generic;

    struct Fixture {
        app: Router,
        repo: MemoryCatalogRepository,
        tokens: Arc<TokenService>,
    }

    fn fixture() -> Fixture {
        let repo = MemoryCatalogRepository::default();
        let tokens = Arc::new(TokenService::new(TokenConfig::with_random_secret()));
        let app = catalog_router_generic(repo.clone(), CatalogConfig::development())
            .layer(Extension(tokens.clone()));
        Fixture { app, repo, tokens }
    }

    impl Fixture {
        fn cookie(&self, role: UserRole) -> (UserId, String) {
            let user_id = UserId::new();
            let token = self
                .tokens
                .issue_auth_token(user_id.into_uuid(), role.code())
                .unwrap();
            (user_id, format!("auth_token={}", token.token))
        }
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_public_listing_is_open() {
        let f = fixture();
        let response = f
            .app
            .oneshot(
                Request::get("/?sort=newest&page=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let f = fixture();
        let response = f
            .app
            .oneshot(Request::get("/no-such-thing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_product_flow() {
        let f = fixture();
        let team = f.repo.add_team("tenun");
        let (owner_id, cookie) = f.cookie(UserRole::Customer);
        f.repo
            .add_member(team, owner_id, account::TeamRole::Owner);

        let body = format!(
            r#"{{"teamId":"{}","name":"Songket","slug":"songket","basePrice":"450000"}}"#,
            team
        );

        let anonymous = f
            .app
            .clone()
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.clone()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let created = f
            .app
            .clone()
            .oneshot(
                Request::post("/")
                    .header(header::COOKIE, &cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = json(created).await;
        assert_eq!(created["slug"], "songket");
        assert_eq!(created["isActive"], true);

        let detail = f
            .app
            .clone()
            .oneshot(Request::get("/songket").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(detail.status(), StatusCode::OK);
        let detail = json(detail).await;
        assert_eq!(detail["name"], "Songket");
        assert!(detail["variants"].as_array().unwrap().is_empty());

        let deleted = f
            .app
            .clone()
            .oneshot(
                Request::delete(format!("/{}", created["productId"].as_str().unwrap()))
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let hidden = f
            .app
            .oneshot(Request::get("/songket").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_slug_is_bad_request() {
        let f = fixture();
        let team = f.repo.add_team("tenun");
        let (_, cookie) = f.cookie(UserRole::Admin);
        let body = format!(
            r#"{{"teamId":"{}","name":"X","slug":"Not A Slug","basePrice":"10"}}"#,
            team
        );
        let response = f
            .app
            .oneshot(
                Request::post("/")
                    .header(header::COOKIE, cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_categories_admin_only() {
        let f = fixture();
        let (_, customer) = f.cookie(UserRole::Customer);
        let (_, admin) = f.cookie(UserRole::Admin);
        let request = |cookie: &str| {
            Request::post("/categories")
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Shirts","slug":"shirts"}"#))
                .unwrap()
        };

        let forbidden = f.app.clone().oneshot(request(&customer)).await.unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let created = f.app.clone().oneshot(request(&admin)).await.unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let duplicate = f.app.clone().oneshot(request(&admin)).await.unwrap();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let listed = f
            .app
            .oneshot(Request::get("/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json(listed).await.as_array().unwrap().len(), 1);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(CatalogError, StatusCode)> = vec![
            (CatalogError::ProductNotFound, StatusCode::NOT_FOUND),
            (CatalogError::VariantNotFound, StatusCode::NOT_FOUND),
            (CatalogError::SizeNotFound, StatusCode::NOT_FOUND),
            (CatalogError::CategoryNotFound, StatusCode::NOT_FOUND),
            (CatalogError::TeamNotFound, StatusCode::NOT_FOUND),
            (CatalogError::Forbidden, StatusCode::FORBIDDEN),
            (CatalogError::SlugTaken, StatusCode::CONFLICT),
            (CatalogError::SkuTaken, StatusCode::CONFLICT),
            (
                CatalogError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }
}

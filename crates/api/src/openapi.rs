//! OpenAPI document, generated from the route handlers and types via utoipa.

use complexity_common::{AnalysisRequest, AnalysisResult, PerformancePoint};

use crate::types::{ErrorResponse, HealthResponse};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Complexity Analyzer API",
        description = "
Classifies the time complexity of a code snippet with a language model and
corroborates it by running a model-generated benchmark.

## Flow

1. **POST** `/api/analyze` with `code` and `language`
2. The model returns a complexity class, a confidence, notes, and a Go benchmark program
3. The benchmark runs under a deadline; its `size,time` lines become `performanceData`

Benchmark failures are not request failures: the analysis is still returned
with an empty `performanceData`.
        ",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::routes::analyze::analyze_code,
        crate::server::health_check
    ),
    components(schemas(
        AnalysisRequest,
        AnalysisResult,
        PerformancePoint,
        HealthResponse,
        ErrorResponse
    )),
    tags(
        (name = "analysis", description = "Complexity analysis"),
        (name = "health", description = "System health and status")
    )
)]
pub struct ApiDoc;

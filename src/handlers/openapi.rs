use axum::Json;
use serde_json::{json, Value};

use crate::models::request::MAX_INDICATORS;
use crate::report::docx::DOCX_CONTENT_TYPE;

pub async fn openapi_document() -> Json<Value> {
    Json(document())
}

fn example_request() -> Value {
    json!({
        "indicators": [
            {"name": "Revenue", "value": 1800000},
            {"name": "Cost of sales", "value": 1374000},
            {"name": "Gross profit", "value": 480000},
            {"name": "Net profit", "value": 480000},
            {"name": "Net profit (restated)", "value": 668000},
            {"name": "Share capital", "value": 100000},
            {"name": "Fixed assets", "value": 208000}
        ],
        "deviation_threshold": 50,
        "rounding_limit": 50,
        "with_docx": false
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}}
    })
}

pub fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Materiality level API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Calculates the materiality level from financial indicators"
        },
        "paths": {
            "/api/v1/calculate": {
                "post": {
                    "summary": "Calculate the materiality level",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {
                            "schema": {"$ref": "#/components/schemas/CalculationRequest"},
                            "example": example_request()
                        }}
                    },
                    "responses": {
                        "200": {
                            "description": "Calculation result, or the Word report when with_docx is set",
                            "content": {
                                "application/json": {"schema": {"$ref": "#/components/schemas/CalculationResponse"}},
                                DOCX_CONTENT_TYPE: {"schema": {"type": "string", "format": "binary"}}
                            }
                        },
                        "400": error_response("Invalid request or calculation failure")
                    }
                }
            },
            "/api/v1/generate-form": {
                "get": {
                    "summary": "Issue a single-use link to the calculation form",
                    "responses": {
                        "200": {
                            "description": "Form link",
                            "content": {"application/json": {"schema": {
                                "type": "object",
                                "properties": {
                                    "form_url": {"type": "string", "format": "uri"},
                                    "expires_at": {"type": "string", "format": "date-time"}
                                }
                            }}}
                        },
                        "503": error_response("Too many open form sessions")
                    }
                }
            },
            "/form/{token}": {
                "get": {
                    "summary": "Calculation form page",
                    "parameters": [{"name": "token", "in": "path", "required": true, "schema": {"type": "string"}}],
                    "responses": {
                        "200": {"description": "HTML form", "content": {"text/html": {}}},
                        "403": error_response("Form already used"),
                        "404": error_response("Session not found"),
                        "410": error_response("Session expired")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Indicator": {
                    "type": "object",
                    "required": ["name", "value"],
                    "properties": {
                        "name": {"type": "string", "minLength": 1},
                        "value": {"type": "number"}
                    }
                },
                "CalculationRequest": {
                    "type": "object",
                    "required": ["indicators"],
                    "properties": {
                        "indicators": {
                            "type": "array",
                            "maxItems": MAX_INDICATORS,
                            "items": {"$ref": "#/components/schemas/Indicator"}
                        },
                        "deviation_threshold": {"type": "number", "minimum": 0, "maximum": 100, "default": 50},
                        "rounding_limit": {"type": "number", "minimum": 0, "default": 50},
                        "with_docx": {"type": "boolean", "default": false}
                    },
                    "example": example_request()
                },
                "CalculationResponse": {
                    "type": "object",
                    "properties": {
                        "materiality_level": {"type": "number"},
                        "calculation_steps": {
                            "type": "object",
                            "properties": {
                                "initial_mean": {"type": "number"},
                                "filtered_mean": {"type": "number"},
                                "excluded_count": {"type": "integer"},
                                "excluded_values": {"type": "array", "items": {"type": "number"}},
                                "filtered_values": {"type": "array", "items": {"type": "number"}},
                                "indicators": {"type": "array", "items": {
                                    "type": "object",
                                    "properties": {
                                        "name": {"type": "string"},
                                        "value": {"type": "number"},
                                        "deviation": {"type": "object", "properties": {
                                            "absolute": {"type": "number"},
                                            "percent": {"type": "number", "nullable": true}
                                        }},
                                        "excluded": {"type": "boolean"}
                                    }
                                }},
                                "rounded_value": {"type": "number"}
                            }
                        },
                        "indicators": {"type": "array", "items": {"$ref": "#/components/schemas/Indicator"}},
                        "message": {"type": "string"}
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": {"error": {"type": "string"}}
                }
            }
        }
    })
}

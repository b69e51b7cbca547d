//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `dynamoman_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use dynamoman_core::storage::StoreError;
use thiserror::Error;

/// An SDK attribute value of a type this client does not know.
#[derive(Debug, Error)]
#[error("attribute value of an unknown type")]
pub struct UnknownAttributeValue;

const THROUGHPUT_EXCEEDED: &str = "Throughput exceeded";
const REQUEST_LIMIT_EXCEEDED: &str = "Request limit exceeded";
const INTERNAL_SERVER_ERROR: &str = "DynamoDB internal server error";

/// Requests that never got a response from the endpoint.
fn connection_failure<E, R>(err: &SdkError<E, R>) -> Option<StoreError>
where
    E: std::error::Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(
            StoreError::ConnectionFailed(DisplayErrorContext(err).to_string()),
        ),
        _ => None,
    }
}

fn table_not_found(table: &str) -> StoreError {
    StoreError::TableNotFound {
        table: table.to_string(),
    }
}

/// Map a ListTables SDK error to StoreError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> StoreError {
    if let Some(failure) = connection_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        ListTablesError::InternalServerError(_) => {
            StoreError::ListFailed(INTERNAL_SERVER_ERROR.to_string())
        }
        err => StoreError::ListFailed(format!("ListTables failed: {:?}", err)),
    }
}

/// Map a DescribeTable SDK error to StoreError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table: &str,
) -> StoreError {
    if let Some(failure) = connection_failure(&err) {
        return failure;
    }
    let unavailable = |reason: String| StoreError::SchemaUnavailable {
        table: table.to_string(),
        reason,
    };
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => table_not_found(table),
        DescribeTableError::InternalServerError(_) => unavailable(INTERNAL_SERVER_ERROR.to_string()),
        err => unavailable(format!("DescribeTable failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table: &str,
) -> StoreError {
    if let Some(failure) = connection_failure(&err) {
        return failure;
    }
    let failed = |reason: String| StoreError::ScanFailed {
        table: table.to_string(),
        reason,
    };
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => table_not_found(table),
        ScanError::ProvisionedThroughputExceededException(_) => {
            failed(THROUGHPUT_EXCEEDED.to_string())
        }
        ScanError::RequestLimitExceeded(_) => failed(REQUEST_LIMIT_EXCEEDED.to_string()),
        ScanError::InternalServerError(_) => failed(INTERNAL_SERVER_ERROR.to_string()),
        err => failed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
) -> StoreError {
    if let Some(failure) = connection_failure(&err) {
        return failure;
    }
    let failed = |reason: String| StoreError::PutFailed {
        table: table.to_string(),
        reason,
    };
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => table_not_found(table),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            failed(THROUGHPUT_EXCEEDED.to_string())
        }
        PutItemError::RequestLimitExceeded(_) => failed(REQUEST_LIMIT_EXCEEDED.to_string()),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            failed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            failed("Transaction conflict".to_string())
        }
        PutItemError::InternalServerError(_) => failed(INTERNAL_SERVER_ERROR.to_string()),
        err => failed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table: &str,
) -> StoreError {
    if let Some(failure) = connection_failure(&err) {
        return failure;
    }
    let failed = |reason: String| StoreError::DeleteFailed {
        table: table.to_string(),
        reason,
    };
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(table),
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            failed(THROUGHPUT_EXCEEDED.to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => failed(REQUEST_LIMIT_EXCEEDED.to_string()),
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            failed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            failed("Transaction conflict".to_string())
        }
        DeleteItemError::InternalServerError(_) => failed(INTERNAL_SERVER_ERROR.to_string()),
        err => failed(format!("DeleteItem failed: {:?}", err)),
    }
}

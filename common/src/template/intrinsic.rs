use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A property value in one of the forms CloudFormation resolves at deploy time
///
/// Only the functions the alias wiring reads or writes are modelled,
/// everything else is carried as is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Intrinsic {
    /// {"Ref": "LogicalName"}
    Ref {
        #[serde(rename = "Ref")]
        logical_id: String,
    },

    /// {"Fn::GetAtt": ["LogicalName", "Attribute"]}
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        target: (String, String),
    },

    /// {"Fn::Join": ["delimiter", [segments...]]}
    Join {
        #[serde(rename = "Fn::Join")]
        join: (String, Vec<Value>),
    },

    /// Plain string, e.g. a hardcoded ARN
    Literal(String),

    Other(Value),
}

impl Intrinsic {
    pub fn reference(logical_id: &str) -> Self {
        Intrinsic::Ref {
            logical_id: logical_id.to_string(),
        }
    }

    pub fn get_att(logical_id: &str, attribute: &str) -> Self {
        Intrinsic::GetAtt {
            target: (logical_id.to_string(), attribute.to_string()),
        }
    }

    /// Plain string value, None for anything resolved at deploy time
    pub fn literal(&self) -> Option<&str> {
        match self {
            Intrinsic::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Logical name behind a {"Ref": ...}
    pub fn ref_target(&self) -> Option<&str> {
        match self {
            Intrinsic::Ref { logical_id } => Some(logical_id),
            _ => None,
        }
    }

    /// Logical name and attribute behind a {"Fn::GetAtt": [...]}
    pub fn get_att_target(&self) -> Option<(&str, &str)> {
        match self {
            Intrinsic::GetAtt {
                target: (logical_id, attribute),
            } => Some((logical_id, attribute)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_reference_forms() {
        let reference: Intrinsic = serde_json::from_value(json!({"Ref": "MyFunc"})).unwrap();
        assert_eq!(reference.ref_target(), Some("MyFunc"));

        let get_att: Intrinsic =
            serde_json::from_value(json!({"Fn::GetAtt": ["MyFunc", "Arn"]})).unwrap();

        assert_eq!(get_att.get_att_target(), Some(("MyFunc", "Arn")));
        assert_eq!(get_att.ref_target(), None);
    }

    #[test]
    fn literal_arn_is_not_a_reference() {
        let literal: Intrinsic =
            serde_json::from_value(json!("arn:aws:lambda:us-east-1:123:function:External"))
                .unwrap();

        assert!(matches!(literal, Intrinsic::Literal(_)));
        assert_eq!(literal.get_att_target(), None);
    }

    #[test]
    fn join_keeps_segments() {
        let join: Intrinsic = serde_json::from_value(json!({
            "Fn::Join": ["", ["arn:aws:apigateway:", {"Ref": "AWS::Region"}, "/invocations"]]
        }))
        .unwrap();

        let Intrinsic::Join {
            join: (delimiter, segments),
        } = &join
        else {
            panic!("Expected Fn::Join, got {join:?}");
        };

        assert_eq!(delimiter, "");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], json!({"Ref": "AWS::Region"}));
    }

    #[test]
    fn unknown_functions_pass_through() {
        let value = json!({"Fn::Sub": "${AWS::StackName}-bucket"});
        let sub: Intrinsic = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(sub, Intrinsic::Other(value.clone()));
        assert_eq!(serde_json::to_value(&sub).unwrap(), value);
    }

    #[test]
    fn writes_cloudformation_shape() {
        assert_eq!(
            serde_json::to_value(Intrinsic::reference("MyFuncAlias")).unwrap(),
            json!({"Ref": "MyFuncAlias"})
        );

        assert_eq!(
            serde_json::to_value(Intrinsic::get_att("MyFunc", "Arn")).unwrap(),
            json!({"Fn::GetAtt": ["MyFunc", "Arn"]})
        );
    }
}

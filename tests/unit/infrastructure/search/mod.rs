mod elastic_body_test;
